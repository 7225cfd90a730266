//! Return type resolution and alias expansion.

use crate::error::{CompileError, CompileResult, ErrorKind};
use bintransfer_ast::{GenericAlias, Span, TypeIdentifier, TypeSizeSpecification};
use bintransfer_model::GenericType;
use indexmap::IndexMap;
use tracing::trace;

/// What a type identifier denotes once aliases are expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Generic(GenericType),
    StrictSize(GenericType, u32),
    /// Container type, constructor or trait, not yet namespace-qualified
    Reference(String),
}

/// Aliases of one compilation, keyed by bare name.
#[derive(Debug, Default)]
pub struct AliasTable {
    aliases: IndexMap<String, GenericAlias>,
}

impl AliasTable {
    pub fn clear(&mut self) {
        self.aliases.clear();
    }

    /// Register an alias; names are global across namespaces.
    pub fn register(&mut self, alias: &GenericAlias) -> CompileResult<()> {
        if let Some(existing) = self.aliases.get(&alias.name.name) {
            return Err(CompileError::new(
                ErrorKind::DuplicateAlias,
                alias.name.span,
                format!("alias \"{}\" is already declared", alias.name.name),
            )
            .with_label(existing.name.span, "first declared here"));
        }
        trace!(alias = %alias.name.name, target = %alias.target, "registered alias");
        self.aliases.insert(alias.name.name.clone(), alias.clone());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Resolved target of every alias, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &GenericAlias)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check that every alias ends in a generic type.
    pub fn validate(&self) -> CompileResult<()> {
        for alias in self.aliases.values() {
            match self.resolve(&alias.target)? {
                ResolvedType::Generic(_) | ResolvedType::StrictSize(..) => {}
                ResolvedType::Reference(target) => {
                    return Err(CompileError::new(
                        ErrorKind::InvalidAliasTarget,
                        alias.target.span(),
                        format!(
                            "alias \"{}\" must name a generic type, found \"{}\"",
                            alias.name.name, target
                        ),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Resolve a type identifier, expanding aliases recursively.
    pub fn resolve(&self, ty: &TypeIdentifier) -> CompileResult<ResolvedType> {
        self.resolve_with(ty, &mut Vec::new())
    }

    fn resolve_with<'a>(
        &'a self,
        ty: &TypeIdentifier,
        visiting: &mut Vec<&'a str>,
    ) -> CompileResult<ResolvedType> {
        match ty {
            TypeIdentifier::Sized(spec) => self.resolve_sized(spec, visiting),
            TypeIdentifier::Path(path) => {
                if !path.is_simple() {
                    return Ok(ResolvedType::Reference(path.dotted()));
                }
                let name = path.dotted();
                if let Some(generic) = GenericType::from_name(&name) {
                    return Ok(ResolvedType::Generic(generic));
                }
                match self.aliases.get_key_value(&name) {
                    Some((key, alias)) => self.expand(key, alias, path.span, visiting),
                    None => Ok(ResolvedType::Reference(name)),
                }
            }
        }
    }

    fn expand<'a>(
        &'a self,
        key: &'a str,
        alias: &'a GenericAlias,
        at: Span,
        visiting: &mut Vec<&'a str>,
    ) -> CompileResult<ResolvedType> {
        if visiting.contains(&key) {
            return Err(CompileError::new(
                ErrorKind::AliasCycle,
                at,
                format!("alias \"{}\" refers to itself through {}", key, visiting.join(" -> ")),
            ));
        }
        visiting.push(key);
        let resolved = self.resolve_with(&alias.target, visiting);
        visiting.pop();
        resolved
    }

    fn resolve_sized<'a>(
        &'a self,
        spec: &TypeSizeSpecification,
        visiting: &mut Vec<&'a str>,
    ) -> CompileResult<ResolvedType> {
        let base = GenericType::from_name(&spec.name.name).map_or_else(
            || match self.aliases.get_key_value(&spec.name.name) {
                Some((key, alias)) => self.expand(key, alias, spec.name.span, visiting),
                None => Ok(ResolvedType::Reference(spec.name.name.clone())),
            },
            |g| Ok(ResolvedType::Generic(g)),
        )?;

        let generic = match base {
            ResolvedType::Generic(g) => g,
            _ => {
                return Err(CompileError::new(
                    ErrorKind::UnresolvedGenericType,
                    spec.name.span,
                    format!(
                        "size specification requires a generic type, \"{}\" is not one",
                        spec.name.name
                    ),
                ))
            }
        };

        if !generic.allows_strict_size() {
            return Err(CompileError::new(
                ErrorKind::InvalidStrictSize,
                spec.span,
                format!("only string and bytes accept a size, found {}", generic),
            ));
        }

        let size = u32::try_from(spec.size.value).map_err(|_| {
            CompileError::new(
                ErrorKind::InvalidStrictSize,
                spec.size.span,
                format!("size {} is out of range", spec.size.value),
            )
        })?;

        Ok(ResolvedType::StrictSize(generic, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bintransfer_ast::{Identifier, Literal, TypePath};

    fn path(name: &str) -> TypeIdentifier {
        TypeIdentifier::Path(TypePath {
            segments: name
                .split('.')
                .map(|s| Identifier::new(s, Span::default()))
                .collect(),
            span: Span::default(),
        })
    }

    fn sized(name: &str, size: u64) -> TypeIdentifier {
        TypeIdentifier::Sized(TypeSizeSpecification {
            name: Identifier::new(name, Span::default()),
            size: Literal {
                value: size,
                span: Span::default(),
            },
            span: Span::default(),
        })
    }

    fn alias(name: &str, target: TypeIdentifier) -> GenericAlias {
        GenericAlias {
            name: Identifier::new(name, Span::default()),
            target,
            span: Span::default(),
        }
    }

    #[test]
    fn test_generic_and_reference() {
        let table = AliasTable::default();
        assert_eq!(
            table.resolve(&path("uint")).unwrap(),
            ResolvedType::Generic(GenericType::Uint)
        );
        assert_eq!(
            table.resolve(&path("posts.Comment")).unwrap(),
            ResolvedType::Reference("posts.Comment".into())
        );
    }

    #[test]
    fn test_alias_chain_keeps_size() {
        let mut table = AliasTable::default();
        table.register(&alias("Hash", sized("bytes", 32))).unwrap();
        table.register(&alias("Digest", path("Hash"))).unwrap();
        table.validate().unwrap();
        assert_eq!(
            table.resolve(&path("Digest")).unwrap(),
            ResolvedType::StrictSize(GenericType::Bytes, 32)
        );
    }

    #[test]
    fn test_sized_alias_base() {
        let mut table = AliasTable::default();
        table.register(&alias("Blob", path("bytes"))).unwrap();
        assert_eq!(
            table.resolve(&sized("Blob", 4)).unwrap(),
            ResolvedType::StrictSize(GenericType::Bytes, 4)
        );
    }

    #[test]
    fn test_duplicate_alias() {
        let mut table = AliasTable::default();
        table.register(&alias("Hash", path("bytes"))).unwrap();
        let err = table.register(&alias("Hash", path("string"))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateAlias);
        assert_eq!(err.labels.len(), 1);
    }

    #[test]
    fn test_alias_cycle() {
        let mut table = AliasTable::default();
        table.register(&alias("A", path("B"))).unwrap();
        table.register(&alias("B", path("A"))).unwrap();
        assert_eq!(table.validate().unwrap_err().kind, ErrorKind::AliasCycle);
    }

    #[test]
    fn test_alias_to_container_rejected() {
        let mut table = AliasTable::default();
        table.register(&alias("Author", path("User"))).unwrap();
        assert_eq!(
            table.validate().unwrap_err().kind,
            ErrorKind::InvalidAliasTarget
        );
    }

    #[test]
    fn test_strict_size_only_for_string_and_bytes() {
        let table = AliasTable::default();
        assert_eq!(
            table.resolve(&sized("uint", 4)).unwrap_err().kind,
            ErrorKind::InvalidStrictSize
        );
        assert_eq!(
            table.resolve(&sized("Photo", 4)).unwrap_err().kind,
            ErrorKind::UnresolvedGenericType
        );
        assert_eq!(
            table.resolve(&sized("string", 8)).unwrap(),
            ResolvedType::StrictSize(GenericType::String, 8)
        );
    }
}
