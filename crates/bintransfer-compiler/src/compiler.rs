//! AST to container model lowering.
//!
//! Each namespace is compiled into containers named relative to it. When the
//! namespace closes, references that name something declared inside it are
//! qualified, then every name is prefixed with the namespace. Repeating this
//! at each enclosing level makes a bare reference bind to the innermost
//! scope that declares it, while same-named declarations in sibling
//! namespaces never match.

use crate::docs::PendingDocs;
use crate::error::{CompileError, CompileResult, ErrorKind};
use crate::resolve::{AliasTable, ResolvedType};
use bintransfer_ast::{
    BodyEntry, GroupMember, Item, ReturnType, Schema, Span, TraitDeclaration, TypeDeclaration,
    TypeGroup, TypeIdentifier, TypeProperty,
};
use bintransfer_model::{Container, GenericType, Param};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

/// A declared trait and its informational params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitInfo {
    pub name: String,
    pub params: Vec<Param>,
}

/// Compiles schema trees into containers.
///
/// Alias and trait tables belong to the compiler instance and are reset at
/// the start of every [`SchemaCompiler::compile`] call.
#[derive(Debug, Default)]
pub struct SchemaCompiler {
    aliases: AliasTable,
    traits: IndexMap<String, TraitInfo>,
}

/// Output of one namespace level, with names relative to that level.
#[derive(Debug, Default)]
struct Scope {
    containers: Vec<(Container, Span)>,
    traits: Vec<TraitInfo>,
}

impl Scope {
    fn extend(&mut self, other: Scope) {
        self.containers.extend(other.containers);
        self.traits.extend(other.traits);
    }

    /// Qualify references to local declarations, then prefix every name.
    fn enter_namespace(&mut self, namespace: &str) {
        let mut local: IndexSet<String> = IndexSet::new();
        for (container, _) in &self.containers {
            local.insert(container.name.clone());
            local.insert(container.type_name.clone());
        }
        for info in &self.traits {
            local.insert(info.name.clone());
        }

        let qualify = |name: &mut String| {
            if local.contains(name.as_str()) {
                let qualified = format!("{}.{}", namespace, name);
                trace!(reference = %name, qualified = %qualified, "qualified local reference");
                *name = qualified;
            }
        };

        for (container, _) in &mut self.containers {
            container.params.iter_mut().for_each(|p| qualify_param(p, &qualify));
            container.traits.iter_mut().for_each(&qualify);
            container.name = format!("{}.{}", namespace, container.name);
            container.type_name = format!("{}.{}", namespace, container.type_name);
        }
        for info in &mut self.traits {
            info.params.iter_mut().for_each(|p| qualify_param(p, &qualify));
            info.name = format!("{}.{}", namespace, info.name);
        }
    }
}

fn qualify_param(param: &mut Param, qualify: &impl Fn(&mut String)) {
    if let Some(reference) = param.container_reference.as_mut() {
        qualify(reference);
    }
    if let Some(of) = param.vector_of.as_mut() {
        if GenericType::from_name(of).is_none() {
            qualify(of);
        }
    }
}

impl SchemaCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a schema into a flat container list.
    ///
    /// Containers appear in source order (namespaces in place). IDs are
    /// assigned once every name is fully qualified.
    pub fn compile(&mut self, schema: &Schema) -> CompileResult<Vec<Container>> {
        self.aliases.clear();
        self.traits.clear();

        self.register_aliases(&schema.body)?;
        self.aliases.validate()?;

        let scope = self.compile_items(&schema.body)?;

        for info in scope.traits {
            self.traits.entry(info.name.clone()).or_insert(info);
        }

        let mut seen: IndexMap<String, Span> = IndexMap::new();
        let mut containers = Vec::with_capacity(scope.containers.len());
        for (mut container, span) in scope.containers {
            if let Some(first) = seen.get(&container.name) {
                return Err(CompileError::new(
                    ErrorKind::DuplicateContainerName,
                    span,
                    format!("container \"{}\" is already declared", container.name),
                )
                .with_label(*first, "first declared here"));
            }
            seen.insert(container.name.clone(), span);

            container.assign_id();
            debug!(
                name = %container.name,
                id = container.id,
                params = container.params.len(),
                "compiled container"
            );
            containers.push(container);
        }

        Ok(containers)
    }

    /// Traits declared by the last compilation, fully qualified.
    pub fn traits(&self) -> &IndexMap<String, TraitInfo> {
        &self.traits
    }

    /// Aliases registered by the last compilation.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Aliases are global: register them from every scope before any
    /// property is resolved.
    fn register_aliases(&mut self, items: &[Item]) -> CompileResult<()> {
        for item in items {
            match item {
                Item::Alias(alias) => self.aliases.register(alias)?,
                Item::Namespace(ns) => self.register_aliases(&ns.body)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn compile_items(&self, items: &[Item]) -> CompileResult<Scope> {
        let mut scope = Scope::default();
        let mut docs = PendingDocs::default();

        for item in items {
            match item {
                Item::Comment(comment) => docs.push(&comment.text),
                Item::Declaration(decl) => {
                    let container = self.compile_declaration(decl, docs.take())?;
                    scope.containers.push((container, decl.ctor.span));
                }
                Item::TypeGroup(group) => {
                    let members = self.compile_group(group, docs.take())?;
                    scope.containers.extend(members);
                }
                Item::Namespace(ns) => {
                    docs.clear();
                    let mut inner = self.compile_items(&ns.body)?;
                    inner.enter_namespace(&ns.name.name);
                    scope.extend(inner);
                }
                Item::Trait(decl) => {
                    docs.clear();
                    scope.traits.push(self.compile_trait(decl)?);
                }
                Item::Alias(_) => docs.clear(),
            }
        }

        Ok(scope)
    }

    fn compile_declaration(&self, decl: &TypeDeclaration, doc: Vec<String>) -> CompileResult<Container> {
        let params = self.compile_body(&decl.body)?;
        Ok(Container::new(decl.ctor.dotted(), decl.name.dotted())
            .with_params(params)
            .with_doc(doc))
    }

    /// Members share the group's type and traits. Docs before the group
    /// precede each member's own docs.
    fn compile_group(&self, group: &TypeGroup, group_doc: Vec<String>) -> CompileResult<Vec<(Container, Span)>> {
        let traits: Vec<String> = group.traits.iter().map(|t| t.dotted()).collect();
        let mut members = Vec::new();
        let mut docs = PendingDocs::default();

        for member in &group.body {
            match member {
                GroupMember::Comment(comment) => docs.push(&comment.text),
                GroupMember::Container(member) => {
                    let params = self.compile_body(&member.body)?;
                    let mut doc = group_doc.clone();
                    doc.extend(docs.take());
                    let container = Container::new(member.name.dotted(), group.name.name.clone())
                        .with_traits(traits.clone())
                        .with_params(params)
                        .with_doc(doc);
                    members.push((container, member.name.span));
                }
            }
        }

        Ok(members)
    }

    fn compile_trait(&self, decl: &TraitDeclaration) -> CompileResult<TraitInfo> {
        Ok(TraitInfo {
            name: decl.name.name.clone(),
            params: self.compile_body(&decl.body)?,
        })
    }

    fn compile_body(&self, body: &[BodyEntry]) -> CompileResult<Vec<Param>> {
        let mut params = Vec::new();
        let mut docs = PendingDocs::default();

        for entry in body {
            match entry {
                BodyEntry::Comment(comment) => docs.push(&comment.text),
                BodyEntry::Property(property) => {
                    params.push(self.compile_property(property)?.with_doc(docs.take()));
                }
            }
        }

        Ok(params)
    }

    fn compile_property(&self, property: &TypeProperty) -> CompileResult<Param> {
        let name = property.key.name.clone();
        let param = match &property.return_type {
            ReturnType::Type(ty) => match self.aliases.resolve(ty)? {
                ResolvedType::Generic(generic) => Param::generic(name, generic),
                ResolvedType::StrictSize(generic, size) => Param::strict(name, generic, size),
                ResolvedType::Reference(reference) => Param::reference(name, reference),
            },
            ReturnType::Vector(vector) => Param::vector(name, self.vector_item(&vector.item)?),
        };
        Ok(param.optional(property.optional))
    }

    fn vector_item(&self, item: &TypeIdentifier) -> CompileResult<String> {
        match self.aliases.resolve(item)? {
            ResolvedType::Generic(generic) => Ok(generic.as_str().to_string()),
            ResolvedType::Reference(reference) => Ok(reference),
            ResolvedType::StrictSize(generic, size) => Err(CompileError::new(
                ErrorKind::InvalidVectorItem,
                item.span(),
                format!("vector items cannot carry a size, found {}[{}]", generic, size),
            )),
        }
    }
}
