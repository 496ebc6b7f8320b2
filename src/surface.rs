/// Read/write surface of a value-bearing element.
///
/// Implementations decide once, at construction, whether the element is read
/// through its text or through a typed value.
pub trait NumericSurface {
    /// Raw string currently shown by the element.
    fn read_raw(&self) -> String;
    /// Replace the element's shown value.
    fn write_text(&self, text: &str);
}

impl<T: NumericSurface + ?Sized> NumericSurface for &T {
    fn read_raw(&self) -> String {
        (**self).read_raw()
    }

    fn write_text(&self, text: &str) {
        (**self).write_text(text)
    }
}

impl<T: NumericSurface + ?Sized> NumericSurface for std::rc::Rc<T> {
    fn read_raw(&self) -> String {
        (**self).read_raw()
    }

    fn write_text(&self, text: &str) {
        (**self).write_text(text)
    }
}

/// Parse a surface string into a number. Anything empty, malformed or
/// non-finite reads as 0.
#[inline]
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// HTML elements that expose a settable `value` property.
pub const VALUE_ELEMENT_TAGS: [&str; 11] = [
    "input", "select", "textarea", "output", "button", "option", "li", "meter", "progress",
    "data", "param",
];

/// Whether an element with this tag name is read through its `value`.
/// Tag names from the DOM are upper-case for HTML documents.
#[inline]
pub fn tag_has_value(tag_name: &str) -> bool {
    VALUE_ELEMENT_TAGS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag_name))
}

/// Text of a `value` property that may be a string (`<input>`, `<select>`)
/// or a number (`<meter>`, `<progress>`, `<li>`).
#[inline]
pub fn value_property_text(as_string: Option<String>, as_number: Option<f64>) -> String {
    match (as_string, as_number) {
        (Some(s), _) => s,
        (None, Some(n)) => n.to_string(),
        (None, None) => String::new(),
    }
}
