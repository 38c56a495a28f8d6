//! Interactive browse session.
//!
//! Each input line becomes one controller event. Plain text is a keystroke
//! that replaces the whole search box; lines starting with `:` are commands.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::print_listing;
use crate::clients::HttpCatalogClient;
use crate::config::Config;
use crate::controller::{Event, FormField, SearchController, SearchState};

const HELP: &str = "\
Type to search. Commands:
  :pick <n>             choose suggestion n
  :clear                clear the search box
  :close                hide suggestions
  :set <field> <value>  fill a form field
  :submit               add the listing in the form
  :form                 show the form
  :help                 show this help
  :quit                 leave";

#[derive(Debug)]
enum Input {
    Event(Event),
    Pick(usize),
    ShowForm,
    Help,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Event(Event::Keystroke(line.to_string()));
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "pick" | "p" => rest
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map_or_else(|| Input::Invalid("Usage: :pick <n>".to_string()), Input::Pick),
        "clear" | "c" => Input::Event(Event::ClearSearch),
        "close" => Input::Event(Event::OutsideClick),
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            match field.parse::<FormField>() {
                Ok(field) => Input::Event(Event::FormFieldChanged(field, value.to_string())),
                Err(e) => Input::Invalid(e.to_string()),
            }
        }
        "submit" => Input::Event(Event::FormSubmit),
        "form" => Input::ShowForm,
        "help" | "h" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => Input::Invalid(format!("Unknown command ':{other}'")),
    }
}

fn render(state: &SearchState) {
    if let Some(error) = state.error() {
        println!("! {error}");
    }
    if state.is_loading() {
        println!("Loading...");
    }

    if state.suggestions_visible() {
        println!("Suggestions:");
        for (i, suggestion) in state.suggestions().iter().enumerate() {
            println!("  {}. {}", i + 1, suggestion.label());
        }
    }

    println!("{:-<60}", "");
    if state.results().is_empty() {
        println!("No listings to show");
    }
    for listing in state.results() {
        print_listing(listing);
    }
}

fn render_form(state: &SearchState) {
    for field in FormField::ALL {
        println!("  {:<14} {}", field.name(), state.form().get(field));
    }
}

pub async fn cmd_browse(config: &Config) -> anyhow::Result<()> {
    let client = Arc::new(HttpCatalogClient::from_config(&config.client)?);
    let mut controller = SearchController::new(client);

    controller.dispatch(Event::Mount);
    controller.settle().await;
    controller.dispatch(Event::InputFocused);
    render(controller.state());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Event(event) => controller.dispatch(event),
            Input::Pick(n) => match controller.state().suggestions().get(n - 1).cloned() {
                Some(listing) => controller.dispatch(Event::SuggestionClick(listing)),
                None => {
                    println!("No suggestion {n}");
                    continue;
                }
            },
            Input::ShowForm => {
                render_form(controller.state());
                continue;
            }
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Quit => break,
            Input::Invalid(message) => {
                println!("{message}");
                continue;
            }
        }

        controller.settle().await;
        if controller.state().query().is_empty() {
            println!("> (empty)");
        } else {
            println!("> {}", controller.state().query());
        }
        render(controller.state());
    }

    Ok(())
}
