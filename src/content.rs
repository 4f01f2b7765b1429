//! Static content loading: the Act III letter and the catch-game
//! compliments. Failures never surface to the viewer; the built-in
//! fallback is used instead.

use gloo::net::http::Request;

use crate::config::{COMPLIMENTS_PATH, DEFAULT_LETTER, LETTER_PATH, default_compliments};
use crate::error::{ShowError, ShowResult};
use crate::util::cwarn;

pub async fn fetch_text(path: &str) -> ShowResult<String> {
    let resp = Request::get(path).send().await.map_err(|e| ShowError::Fetch {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    if !resp.ok() {
        return Err(ShowError::Status {
            path: path.to_string(),
            status: resp.status(),
        });
    }
    resp.text().await.map_err(|e| ShowError::Fetch {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a JSON array of strings, dropping blank entries.
pub fn parse_compliments(path: &str, body: &str) -> ShowResult<Vec<String>> {
    let list: Vec<String> = serde_json::from_str(body).map_err(|e| ShowError::Parse {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let list: Vec<String> = list
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if list.is_empty() {
        return Err(ShowError::EmptyContent {
            path: path.to_string(),
        });
    }
    Ok(list)
}

pub fn letter_or_default(result: &ShowResult<String>) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text.trim_end().to_string(),
        _ => DEFAULT_LETTER.to_string(),
    }
}

pub fn compliments_or_default(result: ShowResult<Vec<String>>) -> Vec<String> {
    match result {
        Ok(list) if !list.is_empty() => list,
        _ => default_compliments(),
    }
}

pub async fn load_letter() -> String {
    let result = fetch_text(LETTER_PATH).await;
    if let Err(e) = &result {
        cwarn(&format!("gate: using fallback letter ({})", e));
    }
    letter_or_default(&result)
}

pub async fn load_compliments() -> Vec<String> {
    let result = match fetch_text(COMPLIMENTS_PATH).await {
        Ok(body) => parse_compliments(COMPLIMENTS_PATH, &body),
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        cwarn(&format!("catch: using fallback compliments ({})", e));
    }
    compliments_or_default(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_array() {
        let list = parse_compliments("c.json", r#"["one", " two ", ""]"#).unwrap();
        assert_eq!(list, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = parse_compliments("c.json", r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, ShowError::Parse { .. }));
    }

    #[test]
    fn empty_array_falls_back_to_defaults() {
        let result = parse_compliments("c.json", "[]");
        assert_eq!(
            result,
            Err(ShowError::EmptyContent {
                path: "c.json".to_string()
            })
        );
        assert_eq!(compliments_or_default(result), default_compliments());
    }

    #[test]
    fn failed_fetch_uses_default_letter() {
        let failed = Err(ShowError::Status {
            path: LETTER_PATH.to_string(),
            status: 404,
        });
        assert_eq!(letter_or_default(&failed), DEFAULT_LETTER);
        assert_eq!(letter_or_default(&Ok("   ".to_string())), DEFAULT_LETTER);
        assert_eq!(letter_or_default(&Ok("Dear you,\n".to_string())), "Dear you,");
    }

    #[test]
    fn error_messages_name_the_path() {
        let e = ShowError::Status {
            path: "./data/letter.txt".to_string(),
            status: 500,
        };
        assert_eq!(e.to_string(), "fetch ./data/letter.txt returned status 500");
        assert_eq!(
            ShowError::MissingAnchor("catch-area").to_string(),
            "missing anchor `catch-area`"
        );
    }
}
