//! Invocation argument format.
//!
//! Ledger clients submit a function name and string arguments as JSON, in
//! one of two shapes:
//!
//! - `{"Args": ["CreateAsset", "asset1", "hash", "{}"]}` (name first)
//! - `{"function": "CreateAsset", "Args": ["asset1", "hash", "{}"]}`

use serde::Deserialize;

use super::error::ContractError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Invocation {
    #[serde(default)]
    function: Option<String>,
    #[serde(rename = "Args", default)]
    args: Vec<String>,
}

impl Invocation {
    /// Build a name-first invocation.
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = vec![function.into()];
        all.extend(args.into_iter().map(Into::into));
        Self {
            function: None,
            args: all,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        serde_json::from_str(json).map_err(|e| ContractError::Malformed(e.to_string()))
    }

    /// Function name, if the invocation carries one.
    pub fn function(&self) -> Option<&str> {
        match &self.function {
            Some(name) => Some(name.as_str()),
            None => self.args.first().map(String::as_str),
        }
    }

    /// Arguments after the function name.
    pub fn arguments(&self) -> &[String] {
        if self.function.is_some() {
            &self.args
        } else {
            self.args.get(1..).unwrap_or(&[])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_first_form_splits_function_and_arguments() {
        let invocation =
            Invocation::from_json(r#"{"Args":["CreateAsset","asset1","h","{}"]}"#).expect("parse");

        assert_eq!(invocation.function(), Some("CreateAsset"));
        assert_eq!(invocation.arguments(), ["asset1", "h", "{}"]);
    }

    #[test]
    fn explicit_function_form_keeps_all_args() {
        let invocation =
            Invocation::from_json(r#"{"function":"QueryAsset","Args":["asset1"]}"#).expect("parse");

        assert_eq!(invocation.function(), Some("QueryAsset"));
        assert_eq!(invocation.arguments(), ["asset1"]);
    }

    #[test]
    fn empty_args_has_no_function() {
        let invocation = Invocation::from_json(r#"{"Args":[]}"#).expect("parse");

        assert_eq!(invocation.function(), None);
        assert!(invocation.arguments().is_empty());
    }

    #[test]
    fn new_matches_parsed_name_first_form() {
        let built = Invocation::new("AssetExists", ["asset1"]);
        let parsed =
            Invocation::from_json(r#"{"Args":["AssetExists","asset1"]}"#).expect("parse");

        assert_eq!(built, parsed);
    }

    #[test]
    fn non_object_body_is_malformed() {
        let result = Invocation::from_json("not json");
        assert!(matches!(result, Err(ContractError::Malformed(_))));
    }

    #[test]
    fn non_string_args_are_malformed() {
        let result = Invocation::from_json(r#"{"Args":["CreateAsset", 1]}"#);
        assert!(matches!(result, Err(ContractError::Malformed(_))));
    }
}
