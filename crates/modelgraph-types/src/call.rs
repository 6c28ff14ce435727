//! Constructor-call rendering and parsing.

use crate::data_type::DataType;
use crate::error::TypeError;
use crate::kind::{ArgSpec, TypeKind};

/// Reconstruct the constructor-call string for an already-built type.
///
/// Arguments equal to the constructor default are omitted, but only as a
/// trailing run: a non-default argument keeps every default before it in
/// place, since positional holes cannot be skipped.
///
/// `get_call(&DataType::string(42))` is `"STRING(42)"`;
/// `get_call(&DataType::string(None))` is `"STRING()"`.
pub fn get_call(ty: &DataType) -> String {
    let mut args = ty.call_args();
    while args.last().is_some_and(|arg| arg.is_default) {
        args.pop();
    }
    let rendered: Vec<String> = args.into_iter().map(|arg| arg.rendered).collect();
    format!("{}({})", ty.kind().name(), rendered.join(", "))
}

/// Parse a constructor-call string back into a [`DataType`].
///
/// Accepts both the [`get_call`] rendering (`STRING(42)`) and the canonical
/// serialized form (`string(255)`); kind names are case-insensitive.
pub fn parse_call(call: &str) -> Result<DataType, TypeError> {
    let call = call.trim();
    let open = call
        .find('(')
        .ok_or_else(|| TypeError::MalformedCall(call.to_string()))?;
    if !call.ends_with(')') {
        return Err(TypeError::MalformedCall(call.to_string()));
    }

    let name = call[..open].trim();
    let kind = TypeKind::from_name(name).ok_or_else(|| TypeError::UnknownType(name.to_string()))?;

    let inner = &call[open + 1..call.len() - 1];
    let args: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .collect();
    if args.len() > 1 {
        return Err(TypeError::InvalidArgument {
            kind: kind.name(),
            message: format!("expected at most one argument, got {}", args.len()),
        });
    }

    match kind.arg_spec() {
        ArgSpec::None => {
            if !args.is_empty() {
                return Err(TypeError::InvalidArgument {
                    kind: kind.name(),
                    message: "constructor takes no arguments".to_string(),
                });
            }
            Ok(DataType::with_defaults(kind))
        }
        ArgSpec::Length { .. } => {
            let length = args
                .first()
                .map(|arg| {
                    arg.parse::<u32>().map_err(|_| TypeError::InvalidArgument {
                        kind: kind.name(),
                        message: format!("'{arg}' is not a valid length"),
                    })
                })
                .transpose()?;
            Ok(DataType::from_args(kind, length, None))
        }
        ArgSpec::Bound => {
            let bound = args
                .first()
                .map(|arg| {
                    arg.parse::<i64>().map_err(|_| TypeError::InvalidArgument {
                        kind: kind.name(),
                        message: format!("'{arg}' is not a valid bound"),
                    })
                })
                .transpose()?;
            Ok(DataType::from_args(kind, None, bound))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_call_keeps_non_default_argument() {
        assert_eq!(get_call(&DataType::string(42)), "STRING(42)");
        assert_eq!(get_call(&DataType::float(100)), "FLOAT(100)");
    }

    #[test]
    fn test_get_call_drops_trailing_defaults() {
        assert_eq!(get_call(&DataType::string(None)), "STRING()");
        assert_eq!(get_call(&DataType::string(255)), "STRING()");
        assert_eq!(get_call(&DataType::integer(None)), "INTEGER()");
        assert_eq!(get_call(&DataType::uuid()), "UUID()");
    }

    #[test]
    fn test_parse_call_round_trip() {
        for ty in [
            DataType::string(42),
            DataType::string(None),
            DataType::binary(64),
            DataType::integer(1000),
            DataType::float(None),
            DataType::datetime(),
            DataType::uuid(),
            DataType::macaddr(),
        ] {
            assert_eq!(parse_call(&get_call(&ty)).unwrap(), ty);
            assert_eq!(parse_call(&ty.serialize()).unwrap(), ty);
        }
    }

    #[test]
    fn test_parse_call_case_insensitive() {
        assert_eq!(parse_call("string(42)").unwrap(), DataType::string(42));
        assert_eq!(parse_call("Uuid()").unwrap(), DataType::uuid());
    }

    #[test]
    fn test_parse_call_rejects_unknown_type() {
        assert!(matches!(
            parse_call("POINT()"),
            Err(TypeError::UnknownType(name)) if name == "POINT"
        ));
    }

    #[test]
    fn test_parse_call_rejects_malformed_input() {
        assert!(matches!(parse_call("STRING"), Err(TypeError::MalformedCall(_))));
        assert!(matches!(parse_call("STRING(42"), Err(TypeError::MalformedCall(_))));
        assert!(matches!(
            parse_call("UUID(1)"),
            Err(TypeError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_call("STRING(abc)"),
            Err(TypeError::InvalidArgument { .. })
        ));
    }
}
