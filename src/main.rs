//! Interactive menu front-end.
//!
//! Builds charts from typed prompts and writes the rendered SVG into a
//! configured output folder. The folder path persists in a JSON settings
//! file next to the working directory, created with a default on first
//! run.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use stemma::shape::{Parallelogram, Rectangle};
use stemma::{Chart, Direction};

const SETTINGS_FILE: &str = "stemma.json";

#[derive(Debug, Serialize, Deserialize)]
struct Settings {
    folder_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            folder_path: PathBuf::from("."),
        }
    }
}

fn main() {
    let mut settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("failed to load settings: {e}");
            return;
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("Please select an option:");
        println!("1. Display help menu");
        println!("2. Change folder path for file save");
        println!(
            "3. Create a sample file in the specified folder: {}",
            settings.folder_path.display()
        );
        println!(
            "4. Create a new file from a prompt in the specified folder: {}",
            settings.folder_path.display()
        );
        println!("5. Exit");

        let Some(choice) = read_line(&mut lines) else {
            break;
        };
        match choice.trim().parse::<u32>().unwrap_or(0) {
            1 => display_help(&settings),
            2 => {
                if let Err(e) = change_folder(&mut settings, &mut lines) {
                    eprintln!("failed to save settings: {e}");
                }
            }
            3 => report(create_sample_file(&settings)),
            4 => report(create_file_from_prompt(&settings, &mut lines)),
            5 => break,
            _ => println!("Invalid option. Please try again.\n"),
        }
    }
}

fn report(result: Result<PathBuf, String>) {
    match result {
        Ok(path) => println!("SVG file written to {}\n", path.display()),
        Err(message) => eprintln!("{message}\n"),
    }
}

fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next()?.ok()
}

fn display_help(settings: &Settings) {
    println!("\nHelp Menu:");
    println!("1. Display help menu: Displays this help menu");
    println!("2. Change folder path for file save: Save the folder where exported files go");
    println!(
        "3. Create a sample file: writes a built-in demo chart to {}",
        settings.folder_path.display()
    );
    println!(
        "4. Create a new file from a prompt: reads lines until an empty one.\n\
         \nPrompt structure:\
         \n  *fileName* *direction* (TD/BT/LR/RL)\
         \n  *parentNode* --> *childNode* [-t p]\n"
    );
    println!("5. Exit: Exits the application\n");
}

fn change_folder(
    settings: &mut Settings,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
    print!("Enter the folder path to save: ");
    let _ = io::stdout().flush();
    let Some(folder) = read_line(lines) else {
        return Ok(());
    };
    let folder = PathBuf::from(folder.trim());
    if folder.is_dir() {
        settings.folder_path = folder;
        save_settings(settings)?;
        println!("Folder path saved successfully.\n");
    } else {
        println!("Invalid folder path. Please try again.\n");
    }
    Ok(())
}

/// The built-in demo tree, mixing both shapes across three levels.
fn create_sample_file(settings: &Settings) -> Result<PathBuf, String> {
    let mut chart = Chart::new(Direction::LeftToRight);
    let build = |chart: &mut Chart| -> Result<(), stemma::ChartError> {
        let start = chart.add_node("Start", Parallelogram::default().into())?;
        let woop = chart.add_child(start, "woop", Rectangle.into())?;
        let waka = chart.add_child(woop, "waka", Rectangle.into())?;
        let waka2 = chart.add_child(woop, "waka2", Parallelogram::default().into())?;
        chart.add_child(waka, "what dis?", Rectangle.into())?;
        chart.add_child(waka, "this node", Rectangle.into())?;
        chart.add_child(waka, "this node twoo", Rectangle.into())?;
        chart.add_child(waka2, "hui", Rectangle.into())?;
        Ok(())
    };
    build(&mut chart).map_err(|e| format!("failed to build sample chart: {e}"))?;
    write_svg(settings, "defaultName", &chart.to_svg())
}

fn create_file_from_prompt(
    settings: &Settings,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<PathBuf, String> {
    println!("Enter the prompt, finishing with an empty line:");
    let mut source = String::new();
    while let Some(line) = read_line(lines) {
        if line.trim().is_empty() {
            break;
        }
        source.push_str(&line);
        source.push('\n');
    }

    let document = stemma::parse(&source).map_err(|e| {
        let report = miette::Report::new(e);
        format!("{report:?}")
    })?;
    write_svg(settings, &document.name, &document.chart.to_svg())
}

fn write_svg(settings: &Settings, name: &str, svg: &str) -> Result<PathBuf, String> {
    if !settings.folder_path.is_dir() {
        return Err(format!(
            "No usable folder path configured ({}). Please save a folder path first.",
            settings.folder_path.display()
        ));
    }
    let file_name = if name.ends_with(".svg") {
        name.to_string()
    } else {
        format!("{name}.svg")
    };
    let path = settings.folder_path.join(file_name);
    fs::write(&path, svg).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    Ok(path)
}

fn load_settings() -> io::Result<Settings> {
    let path = Path::new(SETTINGS_FILE);
    if !path.exists() {
        let settings = Settings::default();
        fs::write(path, to_pretty_json(&settings)?)?;
        return Ok(settings);
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(io::Error::other)
}

fn save_settings(settings: &Settings) -> io::Result<()> {
    fs::write(SETTINGS_FILE, to_pretty_json(settings)?)
}

fn to_pretty_json(settings: &Settings) -> io::Result<String> {
    serde_json::to_string_pretty(settings).map_err(io::Error::other)
}
