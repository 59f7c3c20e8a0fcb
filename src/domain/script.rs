//! Component scripts and safe serialization of script calls.

use serde::Serialize;
use tracing::warn;

use super::sanitize::escape_html;

/// A script defined by a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentScript {
    /// Name of the script, e.g. `print`. Keys the ledger.
    pub name: String,
    /// The function definition emitted once per response.
    pub function: String,
    /// A call of the function in JavaScript syntax, parameters included,
    /// e.g. `print({&quot;x&quot;:1})`.
    pub call: String,
}

impl ComponentScript {
    pub fn new(
        name: impl Into<String>,
        function: impl Into<String>,
        call: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            function: function.into(),
            call: call.into(),
        }
    }
}

/// Encode one parameter as HTML-escaped JSON.
///
/// A value serde cannot encode becomes an empty parameter; the call is still
/// produced so that rendering continues.
pub fn encode_script_param<T: Serialize + ?Sized>(param: &T) -> String {
    match serde_json::to_string(param) {
        Ok(json) => escape_html(&json),
        Err(err) => {
            warn!(error = %err, "script parameter could not be encoded");
            String::new()
        }
    }
}

/// Join already-encoded parameters into `function_name(a,b,...)`.
pub fn join_script_call<I>(function_name: &str, encoded: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let params: Vec<String> = encoded.into_iter().collect();
    let params_len: usize = params.iter().map(|param| param.len() + 1).sum();
    let mut call = String::with_capacity(function_name.len() + 2 + params_len);
    call.push_str(function_name);
    call.push('(');
    call.push_str(&params.join(","));
    call.push(')');
    call
}

/// Serialize a call of `function_name` with homogeneous parameters.
///
/// Each parameter is JSON encoded then HTML escaped, so the result is safe
/// inside an inline `<script>` element or an event-handler attribute. Use
/// [`script_call!`](crate::script_call) for parameters of mixed types.
pub fn serialize_script_call<T: Serialize>(function_name: &str, params: &[T]) -> String {
    join_script_call(function_name, params.iter().map(encode_script_param))
}

/// Serialize a call with parameters of any serializable types.
///
/// ```
/// let call = weft::script_call!("greet", "Ada", 3);
/// assert_eq!(call, "greet(&quot;Ada&quot;,3)");
/// ```
#[macro_export]
macro_rules! script_call {
    ($function_name:expr $(, $param:expr)* $(,)?) => {
        $crate::domain::script::join_script_call(
            $function_name,
            ::std::vec![$($crate::domain::script::encode_script_param(&$param)),*],
        )
    };
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde::ser::{Error as _, Serializer};
    use serde_json::json;

    use super::*;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot encode"))
        }
    }

    #[test]
    fn map_parameter_is_json_then_html_escaped() {
        let mut params = BTreeMap::new();
        params.insert("x", 1);
        assert_eq!(serialize_script_call("print", &[params]), "print({&quot;x&quot;:1})");
    }

    #[test]
    fn mixed_parameters_are_comma_separated() {
        let call = crate::script_call!("show", "a</script>", 2, json!({"ok": true}));
        assert_eq!(
            call,
            "show(&quot;a&lt;/script&gt;&quot;,2,{&quot;ok&quot;:true})"
        );
    }

    #[test]
    fn no_parameters_yield_empty_parens() {
        assert_eq!(crate::script_call!("init"), "init()");
        assert_eq!(serialize_script_call::<i32>("init", &[]), "init()");
    }

    #[test]
    fn encoding_failure_degrades_to_empty_parameter() {
        let call = crate::script_call!("f", 1, Unencodable, 2);
        assert_eq!(call, "f(1,,2)");
    }

    #[test]
    fn non_string_map_keys_fail_gracefully() {
        let mut params = HashMap::new();
        params.insert(vec![1u8], 1);
        assert_eq!(serialize_script_call("f", &[params]), "f()");
    }
}
