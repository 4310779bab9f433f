//! Part definitions and their attribute fields.
//!
//! In an EAGLE library a part variant lives at
//! `deviceset > devices > device[package] > technologies > technology`, and its
//! metadata is the ordered list of `<attribute name= value= constant=/>`
//! children of the technology element.

use super::document::{Element, LibraryDocument, Node};

const ATTRIBUTE_ELEMENT: &str = "attribute";

/// A named attribute of a part definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Attribute name, e.g. `MPN` or `DISTLINK_CRIMP`.
    pub name: String,
    /// Attribute value.
    pub value: String,
    /// Whether the value is fixed in the schematic (`constant="yes"`).
    pub constant: bool,
}

impl Field {
    /// A non-constant field, the form used for generated metadata.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            constant: false,
        }
    }

    /// Read a field from an `<attribute>` element.
    ///
    /// Returns `None` for other elements and for attributes without a name.
    pub fn from_element(element: &Element) -> Option<Self> {
        if element.name != ATTRIBUTE_ELEMENT {
            return None;
        }
        Some(Self {
            name: element.attribute("name")?.to_string(),
            value: element.attribute("value").unwrap_or_default().to_string(),
            constant: element.attribute("constant") == Some("yes"),
        })
    }

    /// Build the `<attribute>` element for this field.
    pub fn to_element(&self) -> Element {
        Element::new(ATTRIBUTE_ELEMENT)
            .with_attribute("name", self.name.as_str())
            .with_attribute("value", self.value.as_str())
            .with_attribute("constant", if self.constant { "yes" } else { "no" })
    }
}

/// Where a part definition lives in the document, plus the names used to
/// identify it in warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartLocation {
    /// Child indices from the root element to the technology element.
    pub path: Vec<usize>,
    /// Name of the enclosing deviceset (the "parent unit").
    pub unit: String,
    /// Name of the device.
    pub device: String,
    /// Name of the technology variant; empty for the default technology.
    pub technology: String,
}

/// Collect the location of every part definition, in document order.
///
/// Only devices carrying a `package` attribute are considered; symbol-only
/// devices have no orderable part behind them.
pub fn part_locations(document: &LibraryDocument) -> Vec<PartLocation> {
    let mut locations = Vec::new();
    let mut path = Vec::new();
    collect_parts(document.root(), "", &mut path, &mut locations);
    locations
}

fn collect_parts(
    element: &Element,
    unit: &str,
    path: &mut Vec<usize>,
    out: &mut Vec<PartLocation>,
) {
    let unit = if element.name == "deviceset" {
        element.attribute("name").unwrap_or_default()
    } else {
        unit
    };

    if element.name == "device" && element.attribute("package").is_some() {
        let device = element.attribute("name").unwrap_or_default();
        for (tech_list_index, node) in element.children.iter().enumerate() {
            let Node::Element(technologies) = node else { continue };
            if technologies.name != "technologies" {
                continue;
            }
            for (tech_index, node) in technologies.children.iter().enumerate() {
                let Node::Element(technology) = node else { continue };
                if technology.name != "technology" {
                    continue;
                }
                let mut tech_path = path.clone();
                tech_path.extend([tech_list_index, tech_index]);
                out.push(PartLocation {
                    path: tech_path,
                    unit: unit.to_string(),
                    device: device.to_string(),
                    technology: technology.attribute("name").unwrap_or_default().to_string(),
                });
            }
        }
        return;
    }

    for (index, node) in element.children.iter().enumerate() {
        if let Node::Element(child) = node {
            path.push(index);
            collect_parts(child, unit, path, out);
            path.pop();
        }
    }
}

/// Mutable view over the fields of one part definition.
pub struct PartDefinition<'a> {
    element: &'a mut Element,
}

impl<'a> PartDefinition<'a> {
    /// Wrap a technology element.
    pub fn new(element: &'a mut Element) -> Self {
        Self {
            element,
        }
    }

    /// Fields in document order, each paired with its child index.
    pub fn fields(&self) -> Vec<(usize, Field)> {
        self.element
            .children
            .iter()
            .enumerate()
            .filter_map(|(index, node)| match node {
                Node::Element(element) => Field::from_element(element).map(|f| (index, f)),
                _ => None,
            })
            .collect()
    }

    /// Remove every field for which `predicate` returns true.
    ///
    /// Returns the number of removed fields. Non-field children are kept.
    pub fn remove_fields<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Field) -> bool,
    {
        let before = self.element.children.len();
        self.element.children.retain(|node| match node {
            Node::Element(element) => !Field::from_element(element).is_some_and(|f| predicate(&f)),
            _ => true,
        });
        before - self.element.children.len()
    }

    /// Insert `fields` as consecutive children starting at child index `at`.
    ///
    /// Returns the child index just past the inserted block.
    pub fn insert_fields(&mut self, at: usize, fields: &[Field]) -> usize {
        let at = at.min(self.element.children.len());
        for (offset, field) in fields.iter().enumerate() {
            self.element.children.insert(at + offset, Node::Element(field.to_element()));
        }
        at + fields.len()
    }
}
