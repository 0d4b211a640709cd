/// The unit of indentation, written once per nesting level.
const LINE_INDENT: &str = "\t";

/// A value that can be written after `key=`.
///
/// This is the one place where omission is decided: a value that renders to
/// [None] is left out entirely, key included.
pub trait WbValue {
    /// Renders the value, or returns [None] if the key should be omitted.
    fn render(&self) -> Option<String>;
}

impl WbValue for str {
    fn render(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_owned())
        }
    }
}

impl WbValue for String {
    fn render(&self) -> Option<String> {
        self.as_str().render()
    }
}

/// `true` is written as `1`, `false` is left out.
impl WbValue for bool {
    fn render(&self) -> Option<String> {
        self.then(|| "1".to_owned())
    }
}

impl<T: WbValue + ?Sized> WbValue for &T {
    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl<T: WbValue> WbValue for Option<T> {
    fn render(&self) -> Option<String> {
        self.as_ref().and_then(|value| value.render())
    }
}

macro_rules! impl_numeric_value {
    ($($t:ty),*) => {
        $(
            impl WbValue for $t {
                fn render(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

// zero is a meaningful number in this format, absence is expressed with Option
impl_numeric_value!(i32, u32, i64, u64);

/// A WorldBuilder text writer.
///
/// It tracks the indentation depth and a stack of pending end tags, so
/// sections can be nested by calling [Generator::start_section] again before
/// the matching [Generator::end_section].
#[derive(Debug, Default)]
pub struct Generator {
    buffer: String,
    indent: usize,
    end_tags: Vec<&'static str>,
}

impl Generator {
    /// Creates an empty generator at the top level.
    pub fn new() -> Self {
        Self::default()
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buffer.push_str(LINE_INDENT);
        }
    }

    /// Writes `start_tag` at the current depth, remembers `end_tag` and
    /// increases the depth.
    pub fn start_section(&mut self, start_tag: &'static str, end_tag: &'static str) {
        self.add_line(start_tag);
        self.end_tags.push(end_tag);
        self.indent += 1;
    }

    /// Closes the innermost open section. Does nothing if no section is open.
    pub fn end_section(&mut self) {
        if let Some(end_tag) = self.end_tags.pop() {
            self.indent -= 1;
            self.add_line(end_tag);
        }
    }

    /// Writes a whole section, with `body` filling in its content.
    pub fn section<F: FnOnce(&mut Self)>(
        &mut self,
        start_tag: &'static str,
        end_tag: &'static str,
        body: F,
    ) {
        self.start_section(start_tag, end_tag);
        body(self);
        self.end_section();
    }

    /// Writes a line at the current depth.
    pub fn add_line(&mut self, line: &str) {
        self.write_indent();
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Writes a comment line. Comments are never indented.
    pub fn add_comment(&mut self, comment: &str) {
        self.buffer.push('#');
        self.buffer.push_str(comment);
        self.buffer.push('\n');
    }

    /// Writes a presence-only flag: the bare key if set, nothing otherwise.
    pub fn add_flag(&mut self, key: &str, value: bool) {
        if value {
            self.add_line(key);
        }
    }

    /// Writes `key=value`, unless the value is omitted.
    pub fn add_key_value<V: WbValue + ?Sized>(&mut self, key: &str, value: &V) {
        if let Some(rendered) = value.render() {
            self.add_line(&format!("{}={}", key, rendered));
        }
    }

    /// Writes one `key=value` line per element, in order.
    /// Elements count by position, so an empty one is still written as `key=`.
    pub fn add_key_values<V: WbValue>(&mut self, key: &str, values: &[V]) {
        for value in values {
            self.add_line(&format!("{}={}", key, value.render().unwrap_or_default()));
        }
    }

    /// Writes the parts on a single line, separated by commas.
    pub fn add_comma_separated<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(part.as_ref());
        }
        self.add_line(&line);
    }

    /// Writes several pairs on one comma separated line, like `x=3,y=4`.
    /// Omitted values are dropped from the line, and the line is left out if
    /// nothing remains.
    pub fn add_key_value_group(&mut self, pairs: &[(&str, &dyn WbValue)]) {
        let parts: Vec<String> = pairs
            .iter()
            .filter_map(|(key, value)| value.render().map(|v| format!("{}={}", key, v)))
            .collect();
        if !parts.is_empty() {
            self.add_comma_separated(parts);
        }
    }

    /// Writes every pair on one comma separated line, empty values included.
    /// Used for positional pairs, where dropping a value would shift the rest.
    pub fn add_key_value_row(&mut self, pairs: &[(&str, &dyn WbValue)]) {
        self.add_comma_separated(
            pairs
                .iter()
                .map(|(key, value)| format!("{}={}", key, value.render().unwrap_or_default())),
        );
    }

    /// The text generated so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// The number of bytes generated so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consumes the generator, returning the generated file.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_bytes()
    }
}
