//! Build plan for source generators.
//!
//! A generator turns a compiled model into one source file per constructor
//! and per type, plus a shared `Vector` helper and a namespace index. This
//! module only decides *what* to emit and with which context; rendering is
//! left to a [`TemplateRenderer`].

use crate::error::Result;
use bintransfer_model::{Container, GenericType, Param, ParamShape, VectorItem};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// What a [`SourceUnit`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Constructor,
    Type,
    Vector,
    Index,
}

/// One file a generator should emit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceUnit {
    /// Relative output key, `/`-separated, without extension
    pub path: String,
    pub kind: UnitKind,
    /// Template context
    pub context: Value,
}

/// Turns a planned unit into file contents.
pub trait TemplateRenderer {
    type Error;

    fn render(&mut self, unit: &SourceUnit) -> std::result::Result<String, Self::Error>;
}

/// Plan the units for one compiled namespace.
///
/// Units come out in a stable order: constructors in model order, then one
/// type unit per distinct type, then `Vector`, then the index.
pub fn build_plan(namespace: &str, containers: &[Container]) -> Result<Vec<SourceUnit>> {
    let mut units = Vec::with_capacity(containers.len() + 2);
    let mut types: IndexMap<&str, Vec<u32>> = IndexMap::new();

    for container in containers {
        types
            .entry(container.type_name.as_str())
            .or_default()
            .push(container.id);

        let params: Vec<Value> = container
            .params
            .iter()
            .map(|p| param_context(p, containers))
            .collect();
        let model = serde_json::to_value(container)?;

        units.push(SourceUnit {
            path: unit_path(namespace, "constructors", &container.name),
            kind: UnitKind::Constructor,
            context: json!({
                "namespace": namespace,
                "container": model,
                "qualifiedName": qualify(namespace, &container.name),
                "typePath": unit_path(namespace, "types", &container.type_name),
                "params": params,
            }),
        });
    }

    for (type_name, ids) in &types {
        units.push(SourceUnit {
            path: unit_path(namespace, "types", type_name),
            kind: UnitKind::Type,
            context: json!({
                "namespace": namespace,
                "type": qualify(namespace, type_name),
                "possibleIds": ids,
            }),
        });
    }

    let generics: Vec<&str> = GenericType::ALL.iter().map(GenericType::as_str).collect();
    units.push(SourceUnit {
        path: "Vector".to_string(),
        kind: UnitKind::Vector,
        context: json!({ "generics": generics }),
    });

    let index: Vec<Value> = containers
        .iter()
        .map(|c| {
            json!({
                "name": qualify(namespace, &c.name),
                "path": unit_path(namespace, "constructors", &c.name),
            })
        })
        .collect();
    units.push(SourceUnit {
        path: if namespace.is_empty() {
            "index".to_string()
        } else {
            format!("{}/index", namespace)
        },
        kind: UnitKind::Index,
        context: json!({ "namespace": namespace, "constructors": index }),
    });

    debug!(namespace, units = units.len(), types = types.len(), "build plan ready");
    Ok(units)
}

/// Render every unit, pairing each output with its path.
pub fn render_plan<R: TemplateRenderer>(
    units: &[SourceUnit],
    renderer: &mut R,
) -> std::result::Result<Vec<(String, String)>, R::Error> {
    units
        .iter()
        .map(|unit| Ok((unit.path.clone(), renderer.render(unit)?)))
        .collect()
}

fn unit_path(namespace: &str, dir: &str, name: &str) -> String {
    if namespace.is_empty() {
        format!("{}/{}", dir, name)
    } else {
        format!("{}/{}/{}", namespace, dir, name)
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

/// IDs a reference may resolve to within `containers`.
fn possible_ids(reference: &str, containers: &[Container]) -> Vec<u32> {
    if let Some(c) = containers.iter().find(|c| c.name == reference) {
        return vec![c.id];
    }
    containers
        .iter()
        .filter(|c| c.type_name == reference || c.implements(reference))
        .map(|c| c.id)
        .collect()
}

fn param_context(param: &Param, containers: &[Container]) -> Value {
    let base = json!({
        "key": param.name,
        "optional": param.is_optional(),
        "doc": param.doc,
    });
    let extra = match param.shape() {
        Some(ParamShape::Generic(g)) => json!({ "kind": "generic", "type": g.as_str() }),
        Some(ParamShape::StrictSize(g, size)) => {
            json!({ "kind": "generic", "type": g.as_str(), "size": size })
        }
        Some(ParamShape::Vector(VectorItem::Generic(g))) => {
            json!({ "kind": "vector", "type": g.as_str() })
        }
        Some(ParamShape::Vector(VectorItem::Container(of))) => json!({
            "kind": "vector",
            "type": of,
            "possibleIds": possible_ids(of, containers),
        }),
        Some(ParamShape::Reference(r)) => json!({
            "kind": "reference",
            "type": r,
            "possibleIds": possible_ids(r, containers),
        }),
        None => json!({ "kind": "invalid" }),
    };

    let mut merged = base;
    if let (Value::Object(target), Value::Object(source)) = (&mut merged, extra) {
        target.extend(source);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo() -> Vec<Container> {
        vec![
            Container::new("geoPoint", "GeoPoint").with_params(vec![
                Param::generic("latitude", GenericType::Double),
                Param::generic("longitude", GenericType::Double),
            ]),
            Container::new("geoPointEmpty", "GeoPoint"),
            Container::new("place", "Place").with_params(vec![
                Param::reference("point", "GeoPoint"),
                Param::vector("tags", "string"),
            ]),
        ]
    }

    #[test]
    fn test_plan_layout() {
        let units = build_plan("coords", &geo()).unwrap();
        let paths: Vec<_> = units.iter().map(|u| u.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "coords/constructors/geoPoint",
                "coords/constructors/geoPointEmpty",
                "coords/constructors/place",
                "coords/types/GeoPoint",
                "coords/types/Place",
                "Vector",
                "coords/index",
            ]
        );
    }

    #[test]
    fn test_type_unit_lists_its_constructors_only() {
        let containers = geo();
        let units = build_plan("coords", &containers).unwrap();
        let geo_type = units
            .iter()
            .find(|u| u.path == "coords/types/GeoPoint")
            .unwrap();
        assert_eq!(
            geo_type.context["possibleIds"],
            json!([containers[0].id, containers[1].id])
        );
        assert_eq!(geo_type.context["type"], json!("coords.GeoPoint"));
    }

    #[test]
    fn test_param_contexts() {
        let containers = geo();
        let units = build_plan("coords", &containers).unwrap();
        let params = &units[2].context["params"];
        assert_eq!(params[0]["kind"], json!("reference"));
        assert_eq!(
            params[0]["possibleIds"],
            json!([containers[0].id, containers[1].id])
        );
        assert_eq!(params[1], json!({
            "key": "tags",
            "optional": false,
            "doc": [],
            "kind": "vector",
            "type": "string",
        }));
    }

    struct Names;

    impl TemplateRenderer for Names {
        type Error = String;

        fn render(&mut self, unit: &SourceUnit) -> std::result::Result<String, String> {
            match unit.kind {
                UnitKind::Vector => Err("no vector template".to_string()),
                _ => Ok(unit.path.to_uppercase()),
            }
        }
    }

    #[test]
    fn test_render_plan_stops_at_first_error() {
        let units = build_plan("", &geo()).unwrap();
        assert_eq!(units[0].path, "constructors/geoPoint");
        assert_eq!(units.last().unwrap().path, "index");
        assert_eq!(
            render_plan(&units[..2], &mut Names).unwrap()[1].1,
            "CONSTRUCTORS/GEOPOINTEMPTY"
        );
        assert_eq!(
            render_plan(&units, &mut Names).unwrap_err(),
            "no vector template"
        );
    }
}
