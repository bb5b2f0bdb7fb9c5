//! Project-wide metadata: `doxyfile.xml` settings and `index.xml` ordering.

use crate::registry::{Project, Registry};
use crate::xml::{text_of, Element};

pub(super) fn read_settings(project: &mut Project, root: &Element) {
    for option in root.find_all("option") {
        let Some(id) = option.attr("id") else {
            continue;
        };
        let value = text_of(option.find("value"));
        if value.is_empty() {
            continue;
        }
        let value = dequote(&value);
        match id {
            "PROJECT_NAME" => project.name = Some(value),
            "PROJECT_BRIEF" => project.brief = Some(value),
            "PROJECT_NUMBER" => project.version = Some(value),
            _ => {}
        }
    }
}

/// Groups are listed in the order they were defined.
pub(super) fn read_index(registry: &mut Registry, root: &Element) {
    for compound in root.find_all("compound") {
        if compound.attr("kind") != Some("group") {
            continue;
        }
        if let Some(refid) = compound.attr("refid") {
            registry.declare_group(refid);
        }
    }
}

/// Doxyfile values may keep the quotes they were written with.
fn dequote(value: &str) -> String {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse;

    #[test]
    fn settings_are_dequoted() {
        let root = parse(
            r#"<doxyfile>
                 <option id="PROJECT_NAME" type="string"><value>"Widget Kit"</value></option>
                 <option id="PROJECT_BRIEF" type="string"><value>Widgets for C</value></option>
                 <option id="PROJECT_NUMBER" type="string"><value/></option>
                 <option id="OUTPUT_DIRECTORY" type="string"><value>out</value></option>
               </doxyfile>"#,
        )
        .unwrap();
        let mut project = Project::default();
        read_settings(&mut project, &root);
        assert_eq!(project.name.as_deref(), Some("Widget Kit"));
        assert_eq!(project.brief.as_deref(), Some("Widgets for C"));
        assert_eq!(project.version, None);
    }

    #[test]
    fn index_records_group_order() {
        let root = parse(
            r#"<doxygenindex>
                 <compound refid="group__io" kind="group"><name>io</name></compound>
                 <compound refid="widget_8h" kind="file"><name>widget.h</name></compound>
                 <compound refid="group__color" kind="group"><name>color</name></compound>
               </doxygenindex>"#,
        )
        .unwrap();
        let mut registry = Registry::new();
        read_index(&mut registry, &root);
        assert_eq!(registry.group_position("group__io"), 0);
        assert_eq!(registry.group_position("group__color"), 1);
        assert_eq!(registry.group_position("widget_8h"), usize::MAX);
    }
}
