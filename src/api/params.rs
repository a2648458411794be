// Request parameter parsing for the activities API

use std::borrow::Cow;

use crate::activities::ActivityError;

/// Extract the required `email` query parameter.
///
/// A repeated `email` key resolves to its last value.
pub fn email_from_query(query: Option<&str>) -> Result<String, ActivityError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or(""))
        .map_err(|_| ActivityError::MissingEmail)?;
    pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "email").then_some(value))
        .ok_or(ActivityError::MissingEmail)
}

/// Routes under `/activities`
#[derive(Debug, PartialEq, Eq)]
pub enum ApiRoute<'a> {
    List,
    Signup(Cow<'a, str>),
    Unregister(Cow<'a, str>),
}

impl ApiRoute<'_> {
    /// Methods the route answers to, for `Allow` headers
    pub const fn allowed_methods(&self) -> &'static str {
        match self {
            Self::List => "GET, HEAD",
            Self::Signup(_) => "POST",
            Self::Unregister(_) => "DELETE",
        }
    }
}

/// Match `path` against the activities routes, percent-decoding the activity name
pub fn parse_route(path: &str) -> Option<ApiRoute<'_>> {
    let rest = path.strip_prefix("/activities")?;
    if rest.is_empty() || rest == "/" {
        return Some(ApiRoute::List);
    }

    let (encoded_name, action) = rest.strip_prefix('/')?.split_once('/')?;
    if encoded_name.is_empty() {
        return None;
    }
    let name = urlencoding::decode(encoded_name).ok()?;

    match action {
        "signup" => Some(ApiRoute::Signup(name)),
        "unregister" => Some(ApiRoute::Unregister(name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_form_decoded() {
        assert_eq!(
            email_from_query(Some("email=zack%40mergington.edu")).unwrap(),
            "zack@mergington.edu"
        );
        assert_eq!(
            email_from_query(Some("foo=1&email=zack@mergington.edu")).unwrap(),
            "zack@mergington.edu"
        );
    }

    #[test]
    fn test_repeated_email_takes_last() {
        assert_eq!(
            email_from_query(Some("email=a@mergington.edu&email=b%40mergington.edu")).unwrap(),
            "b@mergington.edu"
        );
    }

    #[test]
    fn test_missing_email() {
        assert!(matches!(
            email_from_query(None),
            Err(ActivityError::MissingEmail)
        ));
        assert!(matches!(
            email_from_query(Some("mail=zack@mergington.edu")),
            Err(ActivityError::MissingEmail)
        ));
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(parse_route("/activities"), Some(ApiRoute::List));
        assert_eq!(
            parse_route("/activities/Chess%20Club/signup"),
            Some(ApiRoute::Signup(Cow::Borrowed("Chess Club")))
        );
        assert_eq!(
            parse_route("/activities/Math Club/unregister"),
            Some(ApiRoute::Unregister(Cow::Borrowed("Math Club")))
        );
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(parse_route("/activitiesx"), None);
        assert_eq!(parse_route("/activities//signup"), None);
        assert_eq!(parse_route("/activities/Chess Club/join"), None);
        assert_eq!(parse_route("/activities/Chess Club/signup/extra"), None);
        assert_eq!(parse_route("/activities/%FF/signup"), None);
    }
}
