//! Route table.
//!
//! | Method  | Path          | Route        |
//! |---------|---------------|--------------|
//! | OPTIONS | any           | `Preflight`  |
//! | POST    | `/notes`      | `CreateNote` |
//! | GET     | `/notes`      | `ListNotes`  |
//! | GET     | `/notes/{id}` | `GetNote`    |
//! | PUT     | `/notes/{id}` | `UpdateNote` |
//! | DELETE  | `/notes/{id}` | `DeleteNote` |
//! | *       | anything else | `Unmatched`  |
//!
//! The single-note group matches any path under `/notes/`; the trailing
//! segment is the note id unless the transport already supplied one.

use http::Method;

/// Collection path.
pub const NOTES_PATH: &str = "/notes";

/// A resolved operation. Note ids may be empty; the router rejects those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Preflight,
    CreateNote,
    ListNotes,
    GetNote(String),
    UpdateNote(String),
    DeleteNote(String),
    Unmatched,
}

/// Which part of the notes resource a path addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Collection,
    Member(String),
    Other,
}

impl Target {
    fn parse(path: &str, path_id: Option<&str>) -> Self {
        if path == NOTES_PATH {
            return Self::Collection;
        }
        match path.strip_prefix(NOTES_PATH).and_then(|rest| rest.strip_prefix('/')) {
            Some(rest) => {
                let id = match path_id {
                    Some(id) => id,
                    None => rest.rsplit('/').next().unwrap_or_default(),
                };
                Self::Member(id.to_string())
            }
            None => Self::Other,
        }
    }
}

impl Route {
    /// Resolve a method and path to a route.
    pub fn resolve(method: &Method, path: &str, path_id: Option<&str>) -> Self {
        match (method, Target::parse(path, path_id)) {
            (&Method::OPTIONS, _) => Self::Preflight,
            (&Method::POST, Target::Collection) => Self::CreateNote,
            (&Method::GET, Target::Collection) => Self::ListNotes,
            (&Method::GET, Target::Member(id)) => Self::GetNote(id),
            (&Method::PUT, Target::Member(id)) => Self::UpdateNote(id),
            (&Method::DELETE, Target::Member(id)) => Self::DeleteNote(id),
            _ => Self::Unmatched,
        }
    }

    /// Whether this route runs without a device id.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Preflight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(method: Method, path: &str) -> Route {
        Route::resolve(&method, path, None)
    }

    #[test]
    fn test_collection_routes() {
        assert_eq!(resolve(Method::POST, "/notes"), Route::CreateNote);
        assert_eq!(resolve(Method::GET, "/notes"), Route::ListNotes);
    }

    #[test]
    fn test_member_routes() {
        assert_eq!(resolve(Method::GET, "/notes/abc"), Route::GetNote("abc".into()));
        assert_eq!(resolve(Method::PUT, "/notes/abc"), Route::UpdateNote("abc".into()));
        assert_eq!(
            resolve(Method::DELETE, "/notes/abc"),
            Route::DeleteNote("abc".into())
        );
    }

    #[test]
    fn test_options_matches_any_path() {
        for path in ["/notes", "/notes/abc", "/", "/anything/else"] {
            assert_eq!(resolve(Method::OPTIONS, path), Route::Preflight);
        }
        assert!(Route::Preflight.is_anonymous());
        assert!(!Route::ListNotes.is_anonymous());
    }

    #[test]
    fn test_trailing_segment_is_id() {
        assert_eq!(resolve(Method::GET, "/notes/a/b"), Route::GetNote("b".into()));
    }

    #[test]
    fn test_empty_id() {
        assert_eq!(resolve(Method::GET, "/notes/"), Route::GetNote(String::new()));
        assert_eq!(resolve(Method::DELETE, "/notes/x/"), Route::DeleteNote(String::new()));
    }

    #[test]
    fn test_path_id_takes_precedence() {
        let route = Route::resolve(&Method::GET, "/notes/ignored", Some("real"));
        assert_eq!(route, Route::GetNote("real".into()));
    }

    #[test]
    fn test_unmatched() {
        assert_eq!(resolve(Method::GET, "/"), Route::Unmatched);
        assert_eq!(resolve(Method::GET, "/notesx"), Route::Unmatched);
        assert_eq!(resolve(Method::GET, "/other/notes"), Route::Unmatched);
        assert_eq!(resolve(Method::POST, "/notes/abc"), Route::Unmatched);
        assert_eq!(resolve(Method::PUT, "/notes"), Route::Unmatched);
        assert_eq!(resolve(Method::DELETE, "/notes"), Route::Unmatched);
        assert_eq!(resolve(Method::PATCH, "/notes/abc"), Route::Unmatched);
    }
}
