use serde::Serialize;

use crate::error::Result;
use crate::format::{Format, Toml, Yaml};

/// The metadata block at the top of a post.
///
/// Only the recognised keys are kept. Every field is optional and malformed
/// values resolve to their defaults rather than failing.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

/// A front-matter value, reduced to what the recognised keys care about.
#[derive(Debug)]
enum Datum {
    Text(String),
    Flag(bool),
    List(Vec<Datum>),
    Other,
}

impl FrontMatter {
    /// Splits `input` into its front matter and body.
    ///
    /// A `---` fenced block is read as YAML, a `+++` fenced block as TOML.
    /// Without a (terminated) block, the metadata is empty and the body is
    /// the whole input. A block that isn't valid YAML/TOML is an error.
    pub fn split(input: &str) -> Result<(FrontMatter, &str)> {
        let text = input.strip_prefix('\u{feff}').unwrap_or(input);
        let Some((fence, block, body)) = fenced_block(text) else {
            return Ok((FrontMatter::default(), input));
        };

        if block.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let entries: Vec<(String, Datum)> = match fence {
            "+++" => Toml::from_str::<toml::Table>(block)?
                .into_iter()
                .map(|(k, v)| (k, Datum::from(v)))
                .collect(),
            _ => match Yaml::from_str::<serde_yaml_ng::Value>(block)? {
                serde_yaml_ng::Value::Mapping(map) => map.into_iter()
                    .filter_map(|(k, v)| Some((k.as_str()?.to_owned(), Datum::from(v))))
                    .collect(),
                _ => vec![],
            },
        };

        Ok((FrontMatter::from_entries(entries), body))
    }

    fn from_entries<I: IntoIterator<Item = (String, Datum)>>(entries: I) -> FrontMatter {
        let mut front_matter = FrontMatter::default();
        for (key, value) in entries {
            match key.as_str() {
                "title" => front_matter.title = value.into_text(),
                "description" => front_matter.description = value.into_text(),
                "date" => front_matter.date = value.into_text(),
                "featured_image" => front_matter.featured_image = value.into_text(),
                "tags" => front_matter.tags = match value {
                    Datum::List(items) => items.into_iter().filter_map(Datum::into_text).collect(),
                    _ => vec![],
                },
                _ => {}
            }
        }

        front_matter
    }
}

/// Returns `(fence, block, body)` if `text` opens with a `---` or `+++` line
/// that is closed later on. YAML blocks may also be closed with `...`.
fn fenced_block(text: &str) -> Option<(&'static str, &str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let fence = match lines.next()?.trim_end() {
        "---" => "---",
        "+++" => "+++",
        _ => return None,
    };

    let block_start = text.find('\n')? + 1;
    let mut offset = block_start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == fence || (fence == "---" && trimmed == "...") {
            let block = &text[block_start..offset];
            let body = &text[offset + line.len()..];
            return Some((fence, block, body));
        }

        offset += line.len();
    }

    None
}

impl Datum {
    /// Text for scalar values. Empty strings, `false` and null are absent.
    fn into_text(self) -> Option<String> {
        match self {
            Datum::Text(s) if !s.is_empty() => Some(s),
            Datum::Flag(true) => Some("true".into()),
            _ => None,
        }
    }
}

impl From<serde_yaml_ng::Value> for Datum {
    fn from(value: serde_yaml_ng::Value) -> Self {
        use serde_yaml_ng::Value;

        match value {
            Value::String(s) => Datum::Text(s),
            Value::Number(n) => Datum::Text(n.to_string()),
            Value::Bool(b) => Datum::Flag(b),
            Value::Sequence(items) => Datum::List(items.into_iter().map(Datum::from).collect()),
            Value::Tagged(tagged) => Datum::from(tagged.value),
            Value::Null | Value::Mapping(_) => Datum::Other,
        }
    }
}

impl From<toml::Value> for Datum {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => Datum::Text(s),
            Value::Integer(i) => Datum::Text(i.to_string()),
            Value::Float(f) => Datum::Text(f.to_string()),
            Value::Datetime(d) => Datum::Text(d.to_string()),
            Value::Boolean(b) => Datum::Flag(b),
            Value::Array(items) => Datum::List(items.into_iter().map(Datum::from).collect()),
            Value::Table(_) => Datum::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_front_matter() {
        let (fm, body) = FrontMatter::split("---\n\
            title: Temporada de estreia\n\
            description: \"Como divulgar: um guia\"\n\
            date: 2024-06-01\n\
            tags: [imprensa, '', redes, imprensa]\n\
            featured_image: /img/a.jpg\n\
            author: ignored\n\
            ---\n\
            # Olá\n").unwrap();

        assert_eq!(fm.title.as_deref(), Some("Temporada de estreia"));
        assert_eq!(fm.description.as_deref(), Some("Como divulgar: um guia"));
        assert_eq!(fm.date.as_deref(), Some("2024-06-01"));
        assert_eq!(fm.tags, ["imprensa", "redes", "imprensa"]);
        assert_eq!(fm.featured_image.as_deref(), Some("/img/a.jpg"));
        assert_eq!(body, "# Olá\n");
    }

    #[test]
    fn toml_front_matter() {
        let (fm, body) = FrontMatter::split("+++\n\
            title = \"Temporada\"\n\
            date = 2024-06-01\n\
            tags = [\"imprensa\", \"redes\"]\n\
            draft = true\n\
            +++\n\
            corpo").unwrap();

        assert_eq!(fm.title.as_deref(), Some("Temporada"));
        assert_eq!(fm.date.as_deref(), Some("2024-06-01"));
        assert_eq!(fm.tags, ["imprensa", "redes"]);
        assert_eq!(fm.featured_image, None);
        assert_eq!(body, "corpo");
    }

    #[test]
    fn missing_or_unterminated_block_is_all_body() {
        let text = "# Just a heading\n\nSome text.";
        let (fm, body) = FrontMatter::split(text).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, text);

        let text = "---\ntitle: never closed\n";
        let (fm, body) = FrontMatter::split(text).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, text);
    }

    #[test]
    fn empty_block_and_crlf() {
        let (fm, body) = FrontMatter::split("---\n---\nbody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "body");

        let (fm, body) = FrontMatter::split("---\r\ntitle: Windows\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn malformed_values_use_defaults() {
        let (fm, _) = FrontMatter::split("---\n\
            title: ''\n\
            tags: imprensa\n\
            date: {year: 2024}\n\
            ---\n").unwrap();

        assert_eq!(fm.title, None);
        assert!(fm.tags.is_empty());
        assert_eq!(fm.date, None);

        let (fm, _) = FrontMatter::split("---\ntags: [1, true, null, false, [x]]\n---\n").unwrap();
        assert_eq!(fm.tags, ["1", "true"]);
    }

    #[test]
    fn invalid_syntax_is_an_error() {
        assert!(FrontMatter::split("---\ntitle: [unclosed\n---\nbody").is_err());
        assert!(FrontMatter::split("+++\ntitle = \n+++\nbody").is_err());
    }

    #[test]
    fn serialized_front_matter_parses_back() {
        let original = FrontMatter {
            title: Some("Título: com dois-pontos".into()),
            description: Some("Aspas \"duplas\" e 'simples'".into()),
            date: Some("2024-01-01".into()),
            tags: vec!["z".into(), "a".into(), "z".into()],
            featured_image: Some("https://cdn.example.com/b.jpg".into()),
        };

        let yaml = serde_yaml_ng::to_string(&original).unwrap();
        let document = format!("---\n{yaml}---\nbody");
        let (parsed, body) = FrontMatter::split(&document).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(body, "body");
    }
}
