mod cli;
mod headless;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use wayline_core::menu::{MenuItemKind, MenuItemSpec};
use wayline_core::{settings, toolbar, ActionContext, Platform, WindowMenu};

use crate::cli::{Cli, Command, PlatformArg};
use crate::headless::{HeadlessFlows, HeadlessHost, HeadlessTabs};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let menu_settings = Arc::new(match &cli.settings {
        Some(path) => settings::load_from(path),
        None => settings::load(),
    });
    let platform = match cli.platform {
        Some(PlatformArg::Mac) => Platform::Mac,
        Some(PlatformArg::Other) => Platform::Other,
        None => Platform::current(),
    };

    let host = Arc::new(HeadlessHost::new(
        !cli.no_windows,
        cli.app_window,
        cli.always_on_top,
    ));
    let tabs = Arc::new(HeadlessTabs::new(cli.url.as_deref()));
    let actions = ActionContext::new(
        host.clone(),
        tabs.clone(),
        Arc::new(HeadlessFlows),
        Arc::clone(&menu_settings),
        runtime.handle().clone(),
    );
    let menu = WindowMenu::with_platform(actions, platform);

    menu.setup();
    if !cli.no_windows {
        menu.on_window_created();
    }

    let exit_code = match cli.command {
        Command::Show => {
            if let Some(descriptor) = menu.registry().current() {
                for top in &descriptor.menus {
                    println!("{}", top.title);
                    print_items(&top.items, 1);
                }
            }
            0
        }
        Command::Toolbar { pretty } => {
            let view = menu.get_toolbar_menu();
            let json = if pretty {
                serde_json::to_string_pretty(&view)
            } else {
                view.to_json()
            };
            print_json(json)
        }
        Command::WriteSettings => {
            match &cli.settings {
                Some(path) => settings::save_to(&menu_settings, path),
                None => settings::save(&menu_settings),
            }
            0
        }
        Command::Schema => print_json(serde_json::to_string_pretty(&toolbar::schema())),
        Command::Trigger { menu: label, id } => match menu.trigger_menu_item_by_id(&label, &id) {
            Ok(true) => 0,
            Ok(false) => {
                eprintln!("{}/{} is missing or disabled", label, id);
                2
            }
            Err(e) => {
                eprintln!("error: {}", e);
                1
            }
        },
        Command::Navigate { urls } => {
            let win = HeadlessHost::main_window();
            for url in urls {
                let before = host.installs();
                tabs.navigate(&url);
                menu.on_set_current_location(win, Some(&url));
                let outcome = if host.installs() > before {
                    "rebuilt"
                } else {
                    "unchanged"
                };
                println!("{} {}", outcome, url);
            }
            0
        }
    };

    // Let spawned flows report before exiting.
    runtime.shutdown_timeout(Duration::from_millis(250));
    std::process::exit(exit_code);
}

fn print_json(json: Result<String, serde_json::Error>) -> i32 {
    match json {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}

fn print_items(items: &[MenuItemSpec], depth: usize) {
    let indent = "  ".repeat(depth);
    for item in items {
        if item.is_separator() {
            println!("{}--------", indent);
            continue;
        }
        let mut line = format!("{}{}", indent, item.label);
        if let Some(id) = &item.id {
            line.push_str(&format!(" [{}]", id));
        }
        if let Some(accel) = &item.accelerator {
            line.push_str(&format!("  {}", accel));
        }
        if item.checked == Some(true) {
            line.push_str("  (checked)");
        }
        if !item.enabled {
            line.push_str("  (disabled)");
        }
        println!("{}", line);
        if item.kind == MenuItemKind::Submenu {
            print_items(&item.children, depth + 1);
        }
    }
}
