//! The line a mocked step prints.
//!
//! Format: `[MOCK] <JOB> <message>, key=value, ...; ENV=value, ...`. Inputs
//! follow the headline after `, `; envs follow a `; ` section break. Inside
//! every field `\`, `,` and `;` are backslash-escaped, and keys also escape
//! `=`, so each line decodes back to exactly one headline, input list and
//! env list.

use std::fmt;

use super::params::StepParams;

/// Prefix every mocked step prints before its description.
pub const MOCK_MARKER: &str = "[MOCK]";

/// Characters escaped in headlines and values.
const FIELD_SPECIALS: [char; 3] = ['\\', ',', ';'];

/// Characters escaped in parameter keys.
const KEY_SPECIALS: [char; 4] = ['\\', ',', ';', '='];

fn escape_with(text: &str, specials: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if specials.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a parameter value for a mock line.
///
/// ```
/// use workflow_fixtures::step::line::escape_value;
///
/// assert_eq!(escape_value("1, b=2"), r"1\, b=2");
/// assert_eq!(escape_value("plain"), "plain");
/// ```
pub fn escape_value(value: &str) -> String {
    escape_with(value, &FIELD_SPECIALS)
}

fn escape_key(key: &str) -> String {
    escape_with(key, &KEY_SPECIALS)
}

/// The `[MOCK] <JOB> <message>` part of a mock line, escaped.
pub(crate) fn mock_headline(job_id: Option<&str>, message: &str) -> String {
    escape_value(&MockLine::new(job_id, message).headline)
}

/// The `key=` prefix a parameter is printed with.
pub(crate) fn param_prefix(key: &str) -> String {
    format!("{}=", escape_key(key))
}

/// Decoded mock line.
///
/// # Example
///
/// ```
/// use workflow_fixtures::step::line::MockLine;
///
/// let line = MockLine::new(Some("BUILD"), "Build")
///     .with_inputs([("target", "x86, arm")])
///     .with_envs([("CI", "true")]);
/// let text = line.to_string();
/// assert_eq!(text, r"[MOCK] BUILD Build, target=x86\, arm; CI=true");
/// assert_eq!(MockLine::parse(&text), Some(line));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockLine {
    /// Unescaped `[MOCK] <JOB> <message>`.
    pub headline: String,

    /// Inputs in printed order.
    pub inputs: StepParams,

    /// Envs in printed order.
    pub envs: StepParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Headline,
    Inputs,
    Envs,
}

impl MockLine {
    /// Line for a step with no parameters.
    pub fn new(job_id: Option<&str>, message: &str) -> Self {
        let mut headline = MOCK_MARKER.to_string();
        if let Some(job) = job_id.filter(|j| !j.is_empty()) {
            headline.push(' ');
            headline.push_str(job);
        }
        if !message.is_empty() {
            headline.push(' ');
            headline.push_str(message);
        }
        Self {
            headline,
            ..Self::default()
        }
    }

    pub fn with_inputs<I, K, V>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.inputs = inputs.into_iter().collect();
        self
    }

    pub fn with_envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.envs = envs.into_iter().collect();
        self
    }

    /// Decode a printed line; `None` if it is not a well-formed mock line.
    pub fn parse(text: &str) -> Option<Self> {
        if !text.starts_with(MOCK_MARKER) {
            return None;
        }

        let mut line = Self::default();
        let mut section = Section::Headline;
        let mut key = String::new();
        let mut value: Option<String> = None;
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            let literal = match c {
                '\\' => chars.next()?,
                ',' | ';' => {
                    line.finish_field(section, &mut key, &mut value)?;
                    section = match (c, section) {
                        (';', Section::Envs) => return None,
                        (';', _) => Section::Envs,
                        (_, Section::Headline) => Section::Inputs,
                        (_, current) => current,
                    };
                    if chars.next() != Some(' ') {
                        return None;
                    }
                    continue;
                }
                '=' if section != Section::Headline && value.is_none() => {
                    value = Some(String::new());
                    continue;
                }
                other => other,
            };

            match (section, value.as_mut()) {
                (Section::Headline, _) => line.headline.push(literal),
                (_, Some(value)) => value.push(literal),
                (_, None) => key.push(literal),
            }
        }

        line.finish_field(section, &mut key, &mut value)?;
        Some(line)
    }

    fn finish_field(
        &mut self,
        section: Section,
        key: &mut String,
        value: &mut Option<String>,
    ) -> Option<()> {
        let params = match section {
            Section::Headline => return Some(()),
            Section::Inputs => &mut self.inputs,
            Section::Envs => &mut self.envs,
        };
        let value = value.take()?;
        params.push(std::mem::take(key), value);
        Some(())
    }
}

impl fmt::Display for MockLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", escape_value(&self.headline))?;
        for param in &self.inputs {
            write!(f, ", {}{}", param_prefix(&param.key), escape_value(&param.value))?;
        }
        for (i, param) in self.envs.iter().enumerate() {
            let separator = if i == 0 { "; " } else { ", " };
            write!(
                f,
                "{}{}{}",
                separator,
                param_prefix(&param.key),
                escape_value(&param.value)
            )?;
        }
        Ok(())
    }
}
