//! Script entry point: rebuild the case in a design and report the outcome
//! to the user.

use crate::case::{self, CaseParams, CaseReport};
use crate::design::Design;
use anyhow::Context;
use tracing::error;

/// Shown after a successful build.
pub const SUCCESS_MESSAGE: &str = "ESM Case with holes created.";

/// The host's way of telling the user something.
pub trait UserInterface {
    fn message_box(&self, text: &str);
}

/// Prints message boxes to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleUi;

impl UserInterface for ConsoleUi {
    fn message_box(&self, text: &str) {
        println!("{text}");
    }
}

/// The active design together with the interface used to report on it.
#[derive(Debug)]
pub struct Application<U: UserInterface> {
    pub design: Design,
    pub ui: U,
}

impl<U: UserInterface> Application<U> {
    pub fn new(ui: U) -> Self {
        Application {
            design: Design::new(),
            ui,
        }
    }
}

/// Text of the failure dialog: the full error chain.
pub fn failure_message(err: &anyhow::Error) -> String {
    format!("Failed:\n{err:?}")
}

fn rebuild<U: UserInterface>(
    app: &mut Application<U>,
    params: &CaseParams,
) -> anyhow::Result<CaseReport> {
    app.design.clear_bodies();
    params.validate().context("invalid case parameters")?;
    let report =
        case::build_case(&mut app.design, params).context("failed to build the ESM case")?;
    Ok(report)
}

/// Delete every body in the design, build the case and show the result in a
/// message box. Running it again replaces the previous case.
pub fn run<U: UserInterface>(
    app: &mut Application<U>,
    params: &CaseParams,
) -> anyhow::Result<CaseReport> {
    let outcome = rebuild(app, params);
    match &outcome {
        Ok(_) => app.ui.message_box(SUCCESS_MESSAGE),
        Err(err) => {
            error!("{err:#}");
            app.ui.message_box(&failure_message(err));
        },
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl UserInterface for Recorder {
        fn message_box(&self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }
    }

    #[test]
    fn failure_dialog_carries_the_chain() {
        let mut app = Application::new(Recorder::default());
        let params = CaseParams {
            depth: -1.0,
            ..CaseParams::default()
        };
        assert!(run(&mut app, &params).is_err());

        let messages = app.ui.0.borrow();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Failed:\ninvalid case parameters"));
        assert!(messages[0].contains("depth must be > 0"));
        assert!(app.design.bodies().is_empty());
    }
}
