//! Standalone demo: opens a window with the accent dialog and a preview bar
//! styled from the live accent.

use env_logger::{Builder, Target};
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_accent::{
    accent_picker, AccentPalette, DialogOutcome, FileStore, MemoryStore, PickerConfig, SignalTheme,
};
use log::LevelFilter;

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        Builder::new()
            .target(Target::Stdout)
            .filter_level(LevelFilter::Warn)
            .filter_module("floem_accent", LevelFilter::Debug)
            .init();
    }
}

fn main() {
    init_logger();

    let palette = RwSignal::new(AccentPalette::default());
    let config = PickerConfig::load();
    let store: Box<dyn floem_accent::ColorStore> = match FileStore::default_location() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Persisting to memory only: {e}");
            Box::new(MemoryStore::new())
        }
    };

    floem::Application::new()
        .window(
            move |_| {
                let preview = label(move || {
                    let p = palette.get();
                    format!("Accent {}", p.accent)
                })
                .style(move |s| {
                    let p = palette.get();
                    let [r, g, b] = p.accent.rgb();
                    let [fr, fg, fb] = p.foreground.rgb();
                    s.width_full()
                        .padding(8.0)
                        .background(Color::rgb8(r, g, b))
                        .color(Color::rgb8(fr, fg, fb))
                });

                v_stack((
                    preview,
                    accent_picker(
                        config,
                        store,
                        Box::new(SignalTheme(palette)),
                        |outcome| {
                            if let DialogOutcome::Applied(hex) = outcome {
                                log::info!("Applied {hex}");
                            }
                            floem::quit_app();
                        },
                    ),
                ))
                .style(|s| s.size_full())
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((260.0, 560.0))
                    .title("floem-accent"),
            ),
        )
        .run();
}
