//! Vector Visibility command-line driver
//!
//! Applies toggle commands to a fresh state and prints the result:
//!
//! ```text
//! vector-visibility [--defaults FILE] velocity=on mode=components reset ...
//! ```

use std::process::ExitCode;

use vector_visibility::{Error, Result, VectorVisibility, VisibilityInputs};

fn parse_switch(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        _ => Err(Error::InvalidArgument {
            what: "switch value",
            value: value.to_string(),
        }),
    }
}

fn apply_command(state: &mut VectorVisibility, command: &str) -> Result<()> {
    if command == "reset" {
        state.reset();
        return Ok(());
    }

    let Some((key, value)) = command.split_once('=') else {
        return Err(Error::InvalidArgument {
            what: "command",
            value: command.to_string(),
        });
    };

    match key {
        "velocity" => state.set_velocity_vectors_on(parse_switch(value)?),
        "acceleration" => state.set_acceleration_vectors_on(parse_switch(value)?),
        "force" => state.set_force_vectors_on(parse_switch(value)?),
        "mode" => state.set_mode_named(value)?,
        _ => {
            return Err(Error::InvalidArgument {
                what: "command",
                value: command.to_string(),
            });
        }
    }
    Ok(())
}

fn run(args: Vec<String>) -> Result<String> {
    let mut args = args.into_iter().peekable();

    let defaults = if args.peek().map(String::as_str) == Some("--defaults") {
        args.next();
        let path = args.next().ok_or_else(|| Error::InvalidArgument {
            what: "--defaults",
            value: String::new(),
        })?;
        VisibilityInputs::read(path)?
    } else {
        VisibilityInputs::default()
    };

    let mut state = VectorVisibility::with_defaults(defaults);
    for command in args {
        apply_command(&mut state, &command)?;
    }

    log::info!("{} recompute pass(es)", state.recompute_count());
    Ok(serde_json::to_string_pretty(&state.snapshot())?)
}

fn main() -> ExitCode {
    env_logger::init();

    match run(std::env::args().skip(1).collect()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}
