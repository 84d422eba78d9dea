// src/view/document.rs
use indexmap::IndexMap;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Link,
    Button,
    Input,
    TextArea,
    Label,
}

impl ElementKind {
    /// Input-like elements show translations as placeholder text.
    pub fn takes_placeholder(&self) -> bool {
        matches!(self, Self::Input | Self::TextArea)
    }
}

/// How an element obtains its translated text at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A dotted dictionary key.
    Key(String),
    /// A product shown by its canonical (English) name.
    ProductName(String),
    /// A product identified by its slug.
    ProductId(String),
    /// A field label on a market-price card (`label.<field>`).
    Label(String),
}

impl Binding {
    pub fn key(&self) -> String {
        match self {
            Self::Key(key) => key.clone(),
            Self::ProductName(name) => crate::i18n::product_key(name),
            Self::ProductId(id) => format!("product.{}", id),
            Self::Label(field) => format!("label.{}", field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub text: String,
    pub placeholder: Option<String>,
    pub binding: Option<Binding>,
}

impl Element {
    pub fn new(id: &str, kind: ElementKind, text: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            text: text.to_string(),
            placeholder: None,
            binding: None,
        }
    }

    pub fn bound(id: &str, kind: ElementKind, text: &str, key: &str) -> Self {
        Self::new(id, kind, text).with_binding(Binding::Key(key.to_string()))
    }

    pub fn input(id: &str, placeholder: &str, key: &str) -> Self {
        let mut element = Self::bound(id, ElementKind::Input, "", key);
        element.placeholder = Some(placeholder.to_string());
        element
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    /// What a user sees: placeholder for empty inputs, text otherwise.
    pub fn visible_text(&self) -> &str {
        match (&self.placeholder, self.kind.takes_placeholder()) {
            (Some(placeholder), true) if self.text.is_empty() => placeholder.as_str(),
            _ => self.text.as_str(),
        }
    }
}

/// Typed stand-in for a rendered page: document-level attributes plus the
/// elements keyed by stable id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    lang: String,
    classes: BTreeSet<String>,
    elements: IndexMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            lang: crate::i18n::DEFAULT_LANGUAGE.into(),
            ..Self::default()
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn set_lang(&mut self, lang: &str) {
        self.lang = lang.to_string();
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Inserts or replaces by id; replacement keeps the original position.
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        for element in elements {
            self.insert(element);
        }
    }

    pub fn remove_prefixed(&mut self, prefix: &str) {
        self.elements.retain(|id, _| !id.starts_with(prefix));
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).map(Element::visible_text)
    }

    /// Sets the text of an existing element; missing ids are ignored.
    pub fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.values_mut()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
