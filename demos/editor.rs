use macroquad::prelude::*;
use std::time::Duration;
use tilesmith::{Command, GameConfig, Session};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "assets/game.json";

fn window_conf() -> Conf {
    let defaults = GameConfig::default();
    Conf {
        window_title: defaults.window_title,
        window_width: defaults.window_width as i32,
        window_height: defaults.window_height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn steer_direction() -> (i32, i32) {
    let held = |a: KeyCode, b: KeyCode| is_key_down(a) || is_key_down(b);
    let dx = held(KeyCode::Right, KeyCode::D) as i32 - held(KeyCode::Left, KeyCode::A) as i32;
    let dy = held(KeyCode::Down, KeyCode::S) as i32 - held(KeyCode::Up, KeyCode::W) as i32;
    (dx, dy)
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_owned());
    let config = match GameConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %config_path, error = %e, "using default configuration");
            GameConfig::default()
        }
    };

    let mut session = match Session::bootstrap(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("startup failed: {e:#}");
            std::process::exit(1);
        }
    };

    let mut frame = Image {
        bytes: Vec::new(),
        width: 0,
        height: 0,
    };
    let mut texture: Option<Texture2D> = None;
    let mut steering = (0, 0);
    let mut window = (screen_width() as i32, screen_height() as i32);
    session.push(Command::Resize {
        width: window.0,
        height: window.1,
    });

    loop {
        let (mx, my) = mouse_position();
        let (x, y) = (mx as i32, my as i32);
        if is_mouse_button_pressed(MouseButton::Left) {
            session.push(Command::PrimaryClick { x, y });
        }
        if is_mouse_button_pressed(MouseButton::Right) {
            session.push(Command::SecondaryClick { x, y });
        }

        let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
        if ctrl && is_key_pressed(KeyCode::S) {
            session.push(Command::Save);
        }
        if is_key_pressed(KeyCode::Q) {
            session.push(Command::TogglePalette);
        }

        let dir = if ctrl { (0, 0) } else { steer_direction() };
        if dir != steering {
            steering = dir;
            session.push(Command::Steer {
                dx: dir.0,
                dy: dir.1,
            });
        }

        let size = (screen_width() as i32, screen_height() as i32);
        if size != window {
            window = size;
            session.push(Command::Resize {
                width: size.0,
                height: size.1,
            });
        }

        session.frame(Duration::from_secs_f32(get_frame_time()));
        session.present_to(&mut frame);

        let reuse = texture
            .as_ref()
            .is_some_and(|t| t.width() as u16 == frame.width && t.height() as u16 == frame.height);
        if reuse {
            if let Some(t) = &texture {
                t.update(&frame);
            }
        } else {
            let t = Texture2D::from_image(&frame);
            t.set_filter(FilterMode::Nearest);
            texture = Some(t);
        }

        clear_background(BLACK);
        if let Some(t) = &texture {
            draw_texture(t, 0.0, 0.0, WHITE);
        }
        next_frame().await;
    }
}
