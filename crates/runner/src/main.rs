//! `fundata [--post] <uri-path> [key=value ...]`
//!
//! Issues one signed request and prints the response envelope.
//! Credentials come from `FUNDATA_API_KEY` / `FUNDATA_API_SECRET`.

use auth::{ApiCredentials, ParamValue, ParameterSet};
use fundata_rest::{FundataClient, FundataConfig, FundataError};
use std::process::ExitCode;
use tracing::{error, info};

const USAGE: &str = "usage: fundata [--post] <uri-path> [key=value ...]";

/// Request described by the command line.
#[derive(Debug)]
struct Invocation {
    post: bool,
    uri_path: String,
    params: ParameterSet,
}

fn main() -> ExitCode {
    common::init_logging();

    let invocation = match parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, uri = %invocation.uri_path, "Request failed");
            ExitCode::FAILURE
        }
    }
}

fn run(invocation: &Invocation) -> Result<(), FundataError> {
    let credentials = ApiCredentials::from_env()?;
    let config = FundataConfig::from_env()?;
    let client = FundataClient::with_config(credentials, config)?;

    info!(
        uri = %invocation.uri_path,
        method = if invocation.post { "POST" } else { "GET" },
        args = %invocation.params.canonical_string(),
        "Sending request"
    );

    let envelope = if invocation.post {
        client.post(&invocation.uri_path, &invocation.params)?
    } else {
        client.get(&invocation.uri_path, &invocation.params)?
    };

    println!("retcode: {}", envelope.retcode);
    println!("message: {}", envelope.message);
    let data = serde_json::to_string_pretty(&envelope.data)
        .map_err(|e| FundataError::Decode(e.to_string()))?;
    println!("data: {data}");

    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Invocation, String> {
    let mut post = false;
    let mut uri_path = None;
    let mut params = ParameterSet::new();

    for arg in args {
        if arg == "--post" {
            post = true;
        } else if uri_path.is_none() {
            if !arg.starts_with('/') {
                return Err(format!("uri path must start with '/': {arg}"));
            }
            uri_path = Some(arg);
        } else {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got: {arg}"))?;
            params.insert(key, parse_value(value));
        }
    }

    let uri_path = uri_path.ok_or_else(|| "missing uri path".to_string())?;

    Ok(Invocation {
        post,
        uri_path,
        params,
    })
}

/// Integer, then float, then boolean, otherwise string.
///
/// Text is only reclassified when the typed value renders back to it
/// (integers) or the text is a plain decimal (floats), so `007`, `1e3`,
/// `inf` and `nan` are sent exactly as typed.
fn parse_value(raw: &str) -> ParamValue {
    if let Some(i) = raw.parse::<i64>().ok().filter(|i| i.to_string() == raw) {
        return ParamValue::Int(i);
    }
    if is_plain_decimal(raw) {
        if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
            return ParamValue::Float(f);
        }
    }
    match raw {
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        _ => ParamValue::Str(raw.to_string()),
    }
}

/// Optional sign, digits, exactly one `.`, with digits on both sides.
fn is_plain_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    match unsigned.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_value_kinds() {
        assert_eq!(parse_value("10"), ParamValue::Int(10));
        assert_eq!(parse_value("-3"), ParamValue::Int(-3));
        assert_eq!(parse_value("0.5"), ParamValue::Float(0.5));
        assert_eq!(parse_value("true"), ParamValue::Bool(true));
        assert_eq!(parse_value("ti"), ParamValue::Str("ti".into()));
        assert_eq!(parse_value(""), ParamValue::Str(String::new()));
    }

    #[test]
    fn test_parse_value_keeps_text_that_would_change() {
        let unchanged = [
            "inf", "-inf", "Infinity", "nan", "NaN", "007", "+5", "-0", "1e3", ".5", "5.", "1.2.3",
            "True",
        ];
        for raw in unchanged {
            assert_eq!(parse_value(raw), ParamValue::Str(raw.to_string()), "{raw}");
        }
    }

    #[test]
    fn test_parse_value_plain_decimal() {
        assert_eq!(parse_value("-2.25"), ParamValue::Float(-2.25));
        assert_eq!(parse_value("+0.5"), ParamValue::Float(0.5));
        assert_eq!(parse_value("0"), ParamValue::Int(0));
        assert_eq!(parse_value("false"), ParamValue::Bool(false));
    }

    #[test]
    fn test_parse_args_get() {
        let invocation = parse_args(args(&[
            "/data-service/dota2/pro/league/ti/rank-player",
            "page=1",
            "limit=10",
        ]))
        .unwrap();

        assert!(!invocation.post);
        assert_eq!(
            invocation.uri_path,
            "/data-service/dota2/pro/league/ti/rank-player"
        );
        assert_eq!(invocation.params.canonical_string(), "limit=10&page=1");
    }

    #[test]
    fn test_parse_args_post_flag_anywhere() {
        let invocation = parse_args(args(&["/submit", "a=b=c", "--post"])).unwrap();

        assert!(invocation.post);
        assert_eq!(invocation.params.canonical_string(), "a=b=c");
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["no-slash"])).is_err());
        assert!(parse_args(args(&["/x", "novalue"])).is_err());
    }
}
