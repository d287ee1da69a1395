//! Line-oriented host for the chat widget.
//!
//! Plain lines are typed into the draft and submitted with Enter. Lines
//! starting with `/` are host commands (see [`ReplCommand`]). Each submitted
//! message blocks the loop until its reply, failure or timeout is applied.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tokio::runtime::Handle;

use crate::chat::QUICK_ACTIONS;
use crate::controller::{ConversationController, SendOutcome};
use crate::input::{KeyOutcome, WidgetKey};
use crate::navigator::PageNavigator;
use crate::view;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Type this text and press Enter.
    Message(String),
    /// `/quick [label]`: fire a quick action, or list them.
    Quick(Option<String>),
    /// `/toggle`
    Toggle,
    /// `/close`
    Close,
    /// `/key <name>`
    Key(WidgetKey),
    /// `/page`: show the active hub page.
    Page,
    /// `/help`
    Help,
    /// `/quit` or end of input.
    Quit,
    /// Anything starting with `/` that is not a command.
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = trimmed.strip_prefix('/') else {
            return ReplCommand::Message(trimmed.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "quick" | "q" => ReplCommand::Quick((!arg.is_empty()).then(|| arg.to_string())),
            "toggle" => ReplCommand::Toggle,
            "close" => ReplCommand::Close,
            "key" => match WidgetKey::from_name(arg) {
                Some(key) => ReplCommand::Key(key),
                None => ReplCommand::Unknown(trimmed.to_string()),
            },
            "page" => ReplCommand::Page,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// Drives a [`ConversationController`] from a line reader.
pub struct Repl<'a> {
    controller: &'a mut ConversationController<PageNavigator>,
    runtime: Handle,
    /// Number of log messages already printed.
    printed: usize,
}

impl<'a> Repl<'a> {
    pub fn new(controller: &'a mut ConversationController<PageNavigator>, runtime: Handle) -> Self {
        Self {
            controller,
            runtime,
            printed: 0,
        }
    }

    /// Run until `/quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        if !self.controller.state().is_open() {
            self.controller.toggle();
        }
        self.controller.take_focus_request();
        writeln!(out, "hub-chat {} (type /help for commands)", crate::VERSION)?;
        self.print_new_messages(out)?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            crate::debug_trace!("REPL", "Input line: {:?}", line);
            if !self.execute(ReplCommand::parse(&line), out)? {
                break;
            }
        }
        Ok(())
    }

    /// Send one message and print the outcome. Used by `--once`.
    pub fn ask_once<W: Write>(&mut self, message: &str, out: &mut W) -> Result<SendOutcome> {
        self.printed = self.controller.state().messages().len();
        let outcome = self.controller.send(message);
        self.settle(out)?;
        Ok(outcome)
    }

    /// Execute one command. Returns `false` when the loop should stop.
    pub fn execute<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> Result<bool> {
        match command {
            ReplCommand::Message(text) => {
                if !self.controller.state().is_open() {
                    writeln!(out, "(assistant is closed; /toggle to open)")?;
                    return Ok(true);
                }
                self.controller.set_draft(&text);
                let outcome = self.controller.handle_key(WidgetKey::Enter);
                self.report_key(outcome, out)?;
            }
            ReplCommand::Quick(None) => {
                let labels: Vec<&str> = QUICK_ACTIONS.iter().map(|a| a.label).collect();
                writeln!(out, "Quick actions: {}", labels.join(", "))?;
            }
            ReplCommand::Quick(Some(label)) => match self.controller.send_quick_action(&label) {
                Some(outcome) => self.report_send(outcome, out)?,
                None => writeln!(out, "Unknown quick action '{label}'")?,
            },
            ReplCommand::Toggle => {
                self.controller.toggle();
                self.controller.take_focus_request();
                writeln!(out, "({})", Self::visibility_text(self.controller))?;
            }
            ReplCommand::Close => {
                self.controller.close();
                writeln!(out, "({})", Self::visibility_text(self.controller))?;
            }
            ReplCommand::Key(key) => {
                let outcome = self.controller.handle_key(key);
                self.report_key(outcome, out)?;
            }
            ReplCommand::Page => {
                let page = self.controller.navigator().active();
                writeln!(out, "Current page: {} ({})", page.title(), page.id())?;
            }
            ReplCommand::Help => Self::print_help(out)?,
            ReplCommand::Quit => return Ok(false),
            ReplCommand::Unknown(line) => writeln!(out, "Unknown command: {line}")?,
        }
        Ok(true)
    }

    fn report_key<W: Write>(&mut self, outcome: KeyOutcome, out: &mut W) -> Result<()> {
        match outcome {
            KeyOutcome::Submitted(outcome) => self.report_send(outcome, out),
            KeyOutcome::Closed => {
                writeln!(out, "(assistant closed)")?;
                Ok(())
            }
            KeyOutcome::Ignored => Ok(()),
        }
    }

    fn report_send<W: Write>(&mut self, outcome: SendOutcome, out: &mut W) -> Result<()> {
        match outcome {
            SendOutcome::Dispatched { .. } => self.settle(out),
            SendOutcome::RejectedEmpty => Ok(()),
            SendOutcome::RejectedPending => {
                writeln!(out, "(still waiting for the previous reply)")?;
                Ok(())
            }
        }
    }

    /// Print the user's message, wait for the reply and print it together
    /// with any page switch it caused.
    fn settle<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.print_new_messages(out)?;
        if let Some(indicator) = view::typing_indicator(self.controller.state()) {
            writeln!(out, "{indicator}")?;
        }

        let switches = self.controller.navigator().switches();
        let controller = &mut *self.controller;
        self.runtime.block_on(controller.wait_for_reply());
        self.print_new_messages(out)?;

        if self.controller.navigator().switches() > switches {
            let page = self.controller.navigator().active();
            writeln!(out, "-> Navigated to {}", page.title())?;
        }
        Ok(())
    }

    fn print_new_messages<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let messages = self.controller.state().messages();
        for message in messages.iter().skip(self.printed) {
            writeln!(out, "{}", view::format_message(message))?;
        }
        self.printed = messages.len();
        Ok(())
    }

    fn visibility_text(controller: &ConversationController<PageNavigator>) -> &'static str {
        if controller.state().is_open() {
            "assistant open"
        } else {
            "assistant closed"
        }
    }

    fn print_help<W: Write>(out: &mut W) -> Result<()> {
        writeln!(out, "Type a message and press Enter to ask the assistant.")?;
        writeln!(out, "  /quick [label]  send a quick action (no label lists them)")?;
        writeln!(out, "  /toggle         open or close the assistant")?;
        writeln!(out, "  /close          close the assistant (escape)")?;
        writeln!(out, "  /key <name>     press enter, shift+enter or esc")?;
        writeln!(out, "  /page           show the current hub page")?;
        writeln!(out, "  /quit           exit")?;
        Ok(())
    }
}
