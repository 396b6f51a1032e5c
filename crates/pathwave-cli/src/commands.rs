//! Command implementations for the `pathwave` binary

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use nu_ansi_term::Color;
use pathwave_core::config::{DEFAULT_CONFIG_FILE, USER_SID_ENV};
use pathwave_core::{PathwaveClient, PathwaveConfig, PathwaveResponse, ToolArgs};
use tracing::{debug, info};

/// Load variables from `env_file`, or from `.env` found by walking up from
/// the current directory. Existing process variables are never overwritten.
///
/// Returns the path that was loaded, if any.
pub fn load_env_file(env_file: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    match env_file {
        Some(path) if path.exists() => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        Some(path) => {
            debug!("Env file {} not found", path.display());
            Ok(None)
        }
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e).context("Failed to load .env"),
        },
    }
}

/// Check that a usable identity is configured
///
/// Uses the same lookup as the other commands: `./pathwave.toml` when
/// present, otherwise the process environment. Prints a report and
/// returns whether a client could be built.
pub fn env_check(env_file: Option<&Path>) -> anyhow::Result<bool> {
    match load_env_file(env_file)? {
        Some(path) => println!("Loaded environment variables from {}", path.display()),
        None => println!("No .env file found. Using existing environment variables."),
    }

    match PathwaveConfig::load() {
        Ok(_) => {
            println!("{}", Color::Green.paint(format!("✓ {} is set", USER_SID_ENV)));
            println!(
                "{}",
                Color::Green.paint("Environment validation completed successfully")
            );
            Ok(true)
        }
        Err(e) => {
            debug!("Config check failed: {:?}", e);
            eprintln!("{}", Color::Red.paint(format!("Error: {}", e)));
            eprintln!(
                "{}",
                Color::Yellow.paint(format!(
                    "{} is required to use the Pathwave client.",
                    USER_SID_ENV
                ))
            );
            eprintln!(
                "{}",
                Color::Yellow.paint(format!(
                    "Please set it in your environment, in {} or in a .env file with:",
                    DEFAULT_CONFIG_FILE
                ))
            );
            eprintln!(
                "{}",
                Color::Cyan.paint(format!("{}=your_user_sid_here", USER_SID_ENV))
            );
            Ok(false)
        }
    }
}

/// Parse the `--args` value; it must be a JSON object
pub fn parse_args_json(raw: &str) -> anyhow::Result<ToolArgs> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("--args is not valid JSON")?;

    match value {
        serde_json::Value::Object(args) => Ok(args),
        other => bail!("--args must be a JSON object, got: {}", other),
    }
}

/// Invoke `tool` and print the normalized response
pub async fn invoke(client: &PathwaveClient, tool: &str, raw_args: &str) -> anyhow::Result<bool> {
    let args = parse_args_json(raw_args)?;

    info!("Invoking {} with {} argument(s)", tool, args.len());
    let response = client.invoke_tool(tool, &args).await;

    print_response(&response)?;
    Ok(response.is_ok())
}

/// Send a PayPal payout and print the normalized response
pub async fn payout(
    client: &PathwaveClient,
    email: &str,
    amount: f64,
    currency: Option<&str>,
) -> anyhow::Result<bool> {
    info!("Sending payout to {}", email);
    let response = client.paypal().make_payment(email, amount, currency).await;

    print_response(&response)?;
    Ok(response.is_ok())
}

/// Render a response as pretty JSON in the `{ok, data}` / `{ok, error}` shape
pub fn render_response(response: &PathwaveResponse) -> anyhow::Result<String> {
    serde_json::to_string_pretty(response).context("Failed to serialize response")
}

fn print_response(response: &PathwaveResponse) -> anyhow::Result<()> {
    println!("{}", render_response(response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> PathwaveClient {
        PathwaveClient::new(PathwaveConfig::new("cli-sid").with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn test_parse_args_json_object() {
        let args = parse_args_json(r#"{"a": 1, "b": "two"}"#).unwrap();
        assert_eq!(args["a"], json!(1));
        assert_eq!(args["b"], json!("two"));
    }

    #[test]
    fn test_parse_args_json_rejects_non_object() {
        let err = parse_args_json("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));

        assert!(parse_args_json("{not json").is_err());
    }

    #[test]
    fn test_render_response() {
        let response = PathwaveResponse::failure("HTTP error 404: Not Found");
        let rendered = render_response(&response).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, json!({"ok": false, "error": "HTTP error 404: Not Found"}));
    }

    #[test]
    fn test_load_env_file_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PATHWAVE_CLI_TEST_LOADED=from-file").unwrap();

        let loaded = load_env_file(Some(file.path())).unwrap();
        assert_eq!(loaded.as_deref(), Some(file.path()));
        assert_eq!(
            std::env::var("PATHWAVE_CLI_TEST_LOADED").as_deref(),
            Ok("from-file")
        );

        unsafe {
            std::env::remove_var("PATHWAVE_CLI_TEST_LOADED");
        }
    }

    #[test]
    fn test_load_env_file_missing_path() {
        let loaded = load_env_file(Some(Path::new("/nonexistent/pathwave/.env"))).unwrap();
        assert!(loaded.is_none());
    }

    // Only test in this crate that touches PATHWAVE_USER_SID; the cases run
    // in sequence so they cannot race each other.
    #[test]
    fn test_env_check() {
        let missing_file = Path::new("/nonexistent/pathwave/.env");

        unsafe {
            std::env::remove_var(USER_SID_ENV);
        }
        assert!(!env_check(Some(missing_file)).unwrap());

        unsafe {
            std::env::set_var(USER_SID_ENV, "   ");
        }
        assert!(!env_check(Some(missing_file)).unwrap());

        unsafe {
            std::env::set_var(USER_SID_ENV, "env-check-sid");
        }
        assert!(env_check(Some(missing_file)).unwrap());

        unsafe {
            std::env::remove_var(USER_SID_ENV);
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}=from-dotenv-sid", USER_SID_ENV).unwrap();
        assert!(env_check(Some(file.path())).unwrap());
        assert_eq!(
            std::env::var(USER_SID_ENV).as_deref(),
            Ok("from-dotenv-sid")
        );

        unsafe {
            std::env::remove_var(USER_SID_ENV);
        }
    }

    #[tokio::test]
    async fn test_invoke_command() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/cli-sid/tools/echo/invoke"))
            .and(body_json(json!({"args": {"msg": "hi"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "hi"})))
            .expect(1)
            .mount(&server)
            .await;

        let ok = invoke(&test_client(&server), "echo", r#"{"msg": "hi"}"#)
            .await
            .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn test_invoke_command_rejects_bad_args_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(invoke(&test_client(&server), "echo", "42").await.is_err());
    }

    #[tokio::test]
    async fn test_payout_command_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/cli-sid/tools/paypal.payout/invoke"))
            .and(body_json(json!({
                "args": {"email": "a@example.com", "amount": 5, "currency": "CHF"}
            })))
            .respond_with(ResponseTemplate::new(402).set_body_string("insufficient funds"))
            .expect(1)
            .mount(&server)
            .await;

        let ok = payout(&test_client(&server), "a@example.com", 5.0, None)
            .await
            .unwrap();
        assert!(!ok);
    }
}
