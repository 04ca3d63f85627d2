//! End-to-end dispatch tests over a small nested command tree.

use std::sync::{Arc, Mutex};

use argtree_core::*;
use serde_json::{Value, json};

/// Records the JSON rendering of the innermost context a handler received.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Value>>>);

impl Recorder {
    fn handler(&self) -> impl Fn(&Context<'_>) -> HandlerResult + Send + Sync + 'static {
        let calls = Arc::clone(&self.0);
        move |ctx| {
            let mut seen = ctx.to_json();
            seen["path"] = json!(ctx.path());
            seen["verbose"] = json!(ctx.bool_option("verbose"));
            calls.lock().unwrap().push(seen);
            Ok(())
        }
    }

    fn calls(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }
}

fn git_like(recorder: &Recorder) -> Cli {
    Cli::new("prog")
        .with_version("0.1.0")
        .with_option(
            OptionSchema::new(Some("verbose"), Some("v"), ValueType::Bool).with_default(false),
        )
        .with_command(
            Command::new("greet")
                .with_option(OptionSchema::long("name", ValueType::String).with_default("world"))
                .with_option(OptionSchema::short("n", ValueType::Uint))
                .with_handler(recorder.handler()),
        )
        .with_command(
            Command::new("remote")
                .with_option(OptionSchema::long("timeout", ValueType::Float).with_default(1.5))
                .with_subcommand(
                    Command::new("add")
                        .with_option(
                            OptionSchema::new(Some("fetch"), Some("f"), ValueType::Bool)
                                .with_default(false),
                        )
                        .with_handler(recorder.handler()),
                ),
        )
}

#[test]
fn greet_binds_long_and_short_options() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    cli.run(["prog", "greet", "--name=andy", "-n", "23"]).unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["options"], json!({"name": "andy", "n": 23}));
    assert_eq!(calls[0]["args"], json!([]));
    assert_eq!(calls[0]["verbose"], json!(false));
}

#[test]
fn missing_command_fails_before_any_handler() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    let err = cli.run(["prog"]).unwrap_err();
    assert!(matches!(err, DispatchError::Parse(ParseError::NoCommand)));

    let err = cli.run(["prog", "--name", "andy"]).unwrap_err();
    assert!(matches!(err, DispatchError::Parse(ParseError::NoCommand)));
    assert!(recorder.calls().is_empty());
}

#[test]
fn unknown_command_is_reported() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    let err = cli.run(["prog", "pull", "--name=x"]).unwrap_err();
    assert!(matches!(err, DispatchError::CommandNotFound(ref name) if name == "pull"));
    assert_eq!(err.to_string(), "command not found: pull");
}

#[test]
fn conflict_is_unconditional() {
    let recorder = Recorder::default();
    let cli = Cli::new("prog").with_command(
        Command::new("birthday")
            .with_option(OptionSchema::new(Some("age"), Some("a"), ValueType::Uint))
            .with_handler(recorder.handler()),
    );

    let err = cli.run(["prog", "birthday", "--age=5", "-a=5"]).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Bind {
            source: BindError::Conflict { .. },
            ..
        }
    ));
    assert!(recorder.calls().is_empty());
}

#[test]
fn undeclared_option_is_unexpected() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    let err = cli.run(["prog", "greet", "-n=1", "--message=x"]).unwrap_err();
    match err {
        DispatchError::Bind { path, source } => {
            assert_eq!(path, ["prog", "greet"]);
            assert_eq!(source, BindError::UnexpectedOption("message".into()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_value_type_is_reported() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    let err = cli.run(["prog", "greet", "-n", "many"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "prog greet: invalid value 'many' for option 'n': expected uint"
    );
}

#[test]
fn global_flag_reaches_nested_command() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    cli.run(["prog", "remote", "add", "origin", "url", "-f", "-v"]).unwrap();

    let calls = recorder.calls();
    assert_eq!(calls[0]["path"], json!(["prog", "remote", "add"]));
    assert_eq!(calls[0]["args"], json!(["origin", "url"]));
    assert_eq!(calls[0]["options"], json!({"fetch": true}));
    assert_eq!(calls[0]["verbose"], json!(true));
}

#[test]
fn intermediate_level_binds_its_own_options() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    let timeout = cli
        .inspect(["prog", "remote", "add", "--timeout=3.25"], |ctx| {
            let remote = ctx.parent().expect("add has a parent");
            (remote.command().to_string(), ctx.float_option("timeout"))
        })
        .unwrap();

    assert_eq!(timeout, ("remote".to_string(), Some(3.25)));
}

#[test]
fn command_without_handler_cannot_run() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    let err = cli.run(["prog", "remote", "list"]).unwrap_err();
    assert!(matches!(err, DispatchError::NoHandler { ref path } if path == &["prog", "remote"]));
}

#[test]
fn trailing_flag_policy_is_configurable() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);
    cli.run(["prog", "greet", "-n=2", "--verbose"]).unwrap();
    assert_eq!(recorder.calls()[0]["verbose"], json!(true));

    let strict = git_like(&recorder)
        .with_config(ParserConfig::default().with_trailing_flag(TrailingFlag::Reject));
    let err = strict.run(["prog", "greet", "-n=2", "--verbose"]).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Parse(ParseError::DanglingFlag(ref name)) if name == "verbose"
    ));
}

#[test]
fn handler_error_is_returned_verbatim() {
    let cli = Cli::new("prog").with_command(
        Command::new("fail").with_handler(|_| Err("disk on fire".into())),
    );

    let err = cli.run(["prog", "fail"]).unwrap_err();
    assert!(matches!(err, DispatchError::Handler(_)));
    assert_eq!(err.to_string(), "disk on fire");
}

#[test]
fn help_is_rendered_for_resolved_path() {
    let recorder = Recorder::default();
    let cli = git_like(&recorder);

    let help = cli.help_for(&["remote", "add"]);
    assert!(help.starts_with(
        "Usage: prog [prog_options] remote [remote_options] add [add_options] [arguments]\n"
    ));
    assert!(help.contains("  -v, --verbose\t(default: false)\n"));
    assert!(help.contains("  --timeout\t(default: 1.5)\n"));
    assert!(help.contains("  -f, --fetch\t(default: false)\n"));
}
