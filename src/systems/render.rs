//! Drawing the race and the front-end screens with raylib.
//!
//! Rendering reads the `World` inside raylib's drawing scope; it never
//! mutates game state. Every sprite goes through [`Drawable`], so missing
//! images show up as flat rectangles and the frame is always complete.
use bevy_ecs::prelude::World;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::car::Player;
use crate::components::mapposition::MapPosition;
use crate::components::menu::Menu;
use crate::components::particle::{Particle, Popup};
use crate::components::sprite::{Sprite, SpriteKey};
use crate::components::ttl::Ttl;
use crate::components::zindex::ZIndex;
use crate::constants::{NEAR_MISS_COMBO_WINDOW, NITRO_DURATION, PLAYER_MAX_SPEED};
use crate::resources::debugmode::DebugMode;
use crate::resources::fontstore::FontStore;
use crate::resources::gamestate::GameState;
use crate::resources::highscores::HighScores;
use crate::resources::road::RoadLayout;
use crate::resources::screen::{Screen, Screens};
use crate::resources::texturestore::{Drawable, TextureStore, fallback_color};
use crate::resources::worldtime::WorldTime;

const GRASS: Color = Color {
    r: 34,
    g: 110,
    b: 48,
    a: 255,
};
const ROAD_EDGE: Color = Color {
    r: 230,
    g: 230,
    b: 230,
    a: 255,
};
const LANE_MARK: Color = Color {
    r: 240,
    g: 240,
    b: 200,
    a: 220,
};
const HUD_TEXT: Color = Color {
    r: 250,
    g: 250,
    b: 250,
    a: 255,
};
const HUD_ACCENT: Color = Color {
    r: 255,
    g: 200,
    b: 40,
    a: 255,
};
const SHADE: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 170,
};
const DASH_LENGTH: f32 = 40.0;
const DASH_GAP: f32 = 30.0;
/// HUD km/h per forward speed unit.
const KMH_PER_UNIT: f32 = 10.0;

const INSTRUCTIONS: [&str; 4] = [
    "Drive with LEFT/RIGHT or A/D to change lanes.",
    "UP/DOWN or W/S to accelerate or brake.",
    "Press P to pause. Pass cars to score points.",
    "Collect Nitro for a 3s speed boost, Shield prevents one crash.",
];

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8,
        ..color
    }
}

fn text_width(fonts: &FontStore, text: &str, size: f32) -> f32 {
    match fonts.hud() {
        Some(font) => font.measure_text(text, size, 1.0).x,
        None => {
            let c_text = std::ffi::CString::new(text).unwrap();
            unsafe { raylib::ffi::MeasureText(c_text.as_ptr(), size as i32) as f32 }
        }
    }
}

fn draw_label<D: RaylibDraw>(d: &mut D, fonts: &FontStore, text: &str, x: f32, y: f32, size: f32, color: Color) {
    match fonts.hud() {
        Some(font) => d.draw_text_ex(font, text, Vector2 { x, y }, size, 1.0, color),
        None => d.draw_text(text, x as i32, y as i32, size as i32, color),
    }
}

fn draw_label_centered<D: RaylibDraw>(
    d: &mut D,
    fonts: &FontStore,
    text: &str,
    center_x: f32,
    y: f32,
    size: f32,
    color: Color,
) {
    let x = center_x - text_width(fonts, text, size) * 0.5;
    draw_label(d, fonts, text, x, y, size, color);
}

/// Draw `drawable` filling `dest`.
fn draw_drawable<D: RaylibDraw>(d: &mut D, drawable: Option<&Drawable>, dest: Rectangle, fallback: Color) {
    match drawable {
        Some(Drawable::Texture(tex)) => {
            let src = Rectangle {
                x: 0.0,
                y: 0.0,
                width: tex.width as f32,
                height: tex.height as f32,
            };
            d.draw_texture_pro(tex, src, dest, Vector2 { x: 0.0, y: 0.0 }, 0.0, Color::WHITE);
        }
        Some(Drawable::Shape { color }) => {
            d.draw_rectangle_rec(dest, *color);
            d.draw_rectangle_lines_ex(dest, 2.0, with_alpha(Color::BLACK, 0.4));
        }
        None => d.draw_rectangle_rec(dest, fallback),
    }
}

fn centered_rect(pos: &MapPosition, width: f32, height: f32) -> Rectangle {
    Rectangle {
        x: pos.x() - width * 0.5,
        y: pos.y() - height * 0.5,
        width,
        height,
    }
}

pub fn render_road(world: &World, d: &mut RaylibDrawHandle, textures: &TextureStore) {
    let road = *world.resource::<RoadLayout>();
    let offset = world.resource::<GameState>().road_offset;

    d.clear_background(GRASS);
    let road_rect = |y: f32| Rectangle {
        x: road.margin,
        y,
        width: road.road_width(),
        height: road.screen_height,
    };
    let drawable = textures.get(SpriteKey::Road);
    if let Some(Drawable::Texture(_)) = drawable {
        // Two stacked copies scrolling down.
        draw_drawable(d, drawable, road_rect(offset - road.screen_height), Color::DARKGRAY);
        draw_drawable(d, drawable, road_rect(offset), Color::DARKGRAY);
    } else {
        let color = match drawable {
            Some(Drawable::Shape { color }) => *color,
            _ => Color::DARKGRAY,
        };
        d.draw_rectangle_rec(road_rect(0.0), color);
        draw_lane_marks(d, &road, offset);
    }
    d.draw_rectangle_rec(
        Rectangle {
            x: road.margin - 6.0,
            y: 0.0,
            width: 6.0,
            height: road.screen_height,
        },
        ROAD_EDGE,
    );
    d.draw_rectangle_rec(
        Rectangle {
            x: road.margin + road.road_width(),
            y: 0.0,
            width: 6.0,
            height: road.screen_height,
        },
        ROAD_EDGE,
    );
}

fn draw_lane_marks(d: &mut RaylibDrawHandle, road: &RoadLayout, offset: f32) {
    let period = DASH_LENGTH + DASH_GAP;
    let start = offset.rem_euclid(period) - period;
    for lane in 1..road.lane_count {
        let x = road.divider_x(lane) - 2.0;
        let mut y = start;
        while y < road.screen_height {
            d.draw_rectangle_rec(
                Rectangle {
                    x,
                    y,
                    width: 4.0,
                    height: DASH_LENGTH,
                },
                LANE_MARK,
            );
            y += period;
        }
    }
}

pub fn render_sprites(world: &mut World, d: &mut RaylibDrawHandle, textures: &TextureStore) {
    let mut to_draw: Vec<(ZIndex, MapPosition, Sprite)> = {
        let mut q = world.query::<(&ZIndex, &MapPosition, &Sprite)>();
        q.iter(world).map(|(z, p, s)| (*z, *p, *s)).collect()
    };
    to_draw.sort_by_key(|(z, _, _)| *z);

    for (_, pos, sprite) in to_draw.iter() {
        let dest = centered_rect(pos, sprite.width, sprite.height);
        draw_drawable(d, textures.get(sprite.key), dest, fallback_color(sprite.key));
    }

    // Shield ring around the player.
    let mut players = world.query::<(&Player, &MapPosition)>();
    for (player, pos) in players.iter(world) {
        if player.shield > 0 && player.alive {
            d.draw_circle_lines(pos.x() as i32, pos.y() as i32, 78.0, Color::LIME);
            if player.shield > 1 {
                d.draw_circle_lines(pos.x() as i32, pos.y() as i32, 84.0, Color::LIME);
            }
        }
    }
}

pub fn render_effects(world: &mut World, d: &mut RaylibDrawHandle, fonts: &FontStore) {
    let mut particles = world.query::<(&Particle, &MapPosition, &Ttl)>();
    for (particle, pos, ttl) in particles.iter(world) {
        let life = ttl.fraction_left();
        d.draw_circle_v(pos.pos, particle.size * (0.4 + 0.6 * life), with_alpha(particle.color, life));
    }
    let mut popups = world.query::<(&Popup, &MapPosition, &Ttl)>();
    for (popup, pos, ttl) in popups.iter(world) {
        let life = ttl.fraction_left();
        draw_label_centered(d, fonts, &popup.text, pos.x(), pos.y(), 24.0, with_alpha(popup.color, life));
    }
}

pub fn render_hud(world: &mut World, d: &mut RaylibDrawHandle, fonts: &FontStore) {
    let road = *world.resource::<RoadLayout>();
    let state = world.resource::<GameState>().clone();
    let now = world.resource::<WorldTime>().elapsed;
    let Some(player) = world
        .query::<&Player>()
        .iter(world)
        .next()
        .cloned()
    else {
        return;
    };

    draw_label(d, fonts, &format!("SCORE {}", state.score), 16.0, 12.0, 28.0, HUD_TEXT);
    if let Some(best) = world.get_resource::<HighScores>().and_then(|t| t.best()) {
        draw_label(d, fonts, &format!("BEST {}", best), 16.0, 44.0, 20.0, HUD_ACCENT);
    }

    // Speedometer, bottom right.
    let kmh = (player.display_speed * KMH_PER_UNIT).round() as i32;
    let right = road.screen_width - 16.0;
    let bottom = road.screen_height - 16.0;
    let label = format!("{} km/h", kmh);
    let width = text_width(fonts, &label, 28.0);
    draw_label(d, fonts, &label, right - width, bottom - 56.0, 28.0, HUD_TEXT);
    let bar = Rectangle {
        x: right - 160.0,
        y: bottom - 20.0,
        width: 160.0,
        height: 12.0,
    };
    d.draw_rectangle_rec(bar, SHADE);
    let fill = (player.display_speed / PLAYER_MAX_SPEED).clamp(0.0, 1.2) / 1.2;
    d.draw_rectangle_rec(
        Rectangle {
            width: bar.width * fill,
            ..bar
        },
        HUD_ACCENT,
    );

    if player.nitro > 0.0 {
        let nitro_bar = Rectangle {
            x: 16.0,
            y: bottom - 20.0,
            width: 160.0 * (player.nitro / NITRO_DURATION).clamp(0.0, 1.0),
            height: 12.0,
        };
        draw_label(d, fonts, "NITRO", 16.0, bottom - 46.0, 20.0, Color::SKYBLUE);
        d.draw_rectangle_rec(nitro_bar, Color::SKYBLUE);
    }
    if player.shield > 0 {
        draw_label(d, fonts, &format!("SHIELD x{}", player.shield), 16.0, 72.0, 20.0, Color::LIME);
    }
    let combo_live = state
        .last_near_miss_at
        .is_some_and(|at| now - at <= NEAR_MISS_COMBO_WINDOW);
    if state.near_miss_combo > 1 && combo_live {
        draw_label_centered(
            d,
            fonts,
            &format!("COMBO x{}", state.near_miss_combo),
            road.screen_width * 0.5,
            12.0,
            24.0,
            HUD_ACCENT,
        );
    }
}

fn shade_screen(d: &mut RaylibDrawHandle, road: &RoadLayout) {
    d.draw_rectangle_rec(
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: road.screen_width,
            height: road.screen_height,
        },
        SHADE,
    );
}

pub fn render_overlay(world: &mut World, d: &mut RaylibDrawHandle, fonts: &FontStore) {
    let road = *world.resource::<RoadLayout>();
    let screen = world.resource::<Screen>().get();
    let cx = road.screen_width * 0.5;
    let top = road.screen_height * 0.22;

    match screen {
        Screens::Menu => {
            shade_screen(d, &road);
            draw_label_centered(d, fonts, "SPEED RUSH", cx, top, 64.0, HUD_ACCENT);
            draw_label_centered(d, fonts, "EXTREME HIGHWAY", cx, top + 70.0, 28.0, HUD_TEXT);
            let menu = world.query::<&Menu>().iter(world).next().cloned();
            if let Some(menu) = menu {
                for (i, item) in menu.items.iter().enumerate() {
                    let selected = i == menu.selected_index;
                    let color = if selected { HUD_ACCENT } else { HUD_TEXT };
                    let text = if selected {
                        format!("> {} <", item.label)
                    } else {
                        item.label.to_string()
                    };
                    draw_label_centered(d, fonts, &text, cx, top + 150.0 + i as f32 * 44.0, 32.0, color);
                }
            }
            draw_label_centered(
                d,
                fonts,
                "A/D or arrows: change lane   W/S: throttle   P: pause",
                cx,
                road.screen_height - 40.0,
                18.0,
                HUD_TEXT,
            );
        }
        Screens::Paused => {
            shade_screen(d, &road);
            draw_label_centered(d, fonts, "PAUSED", cx, top + 60.0, 56.0, HUD_TEXT);
            draw_label_centered(d, fonts, "P to resume, Esc for menu", cx, top + 140.0, 24.0, HUD_TEXT);
        }
        Screens::GameOver => {
            shade_screen(d, &road);
            let state = world.resource::<GameState>();
            let best = world.get_resource::<HighScores>().and_then(|t| t.best());
            draw_label_centered(d, fonts, "GAME OVER", cx, top, 64.0, Color::RED);
            draw_label_centered(d, fonts, &format!("SCORE {}", state.score), cx, top + 90.0, 36.0, HUD_TEXT);
            draw_label_centered(
                d,
                fonts,
                &format!("Overtakes {}   Distance {:.1} km", state.overtakes, state.distance / 10_000.0),
                cx,
                top + 140.0,
                22.0,
                HUD_TEXT,
            );
            if let Some(best) = best {
                draw_label_centered(d, fonts, &format!("BEST {}", best), cx, top + 180.0, 28.0, HUD_ACCENT);
            }
            draw_label_centered(d, fonts, "Enter to continue", cx, top + 250.0, 22.0, HUD_TEXT);
        }
        Screens::Instructions => {
            shade_screen(d, &road);
            draw_label_centered(d, fonts, "INSTRUCTIONS", cx, 60.0, 48.0, HUD_ACCENT);
            for (i, line) in INSTRUCTIONS.iter().enumerate() {
                draw_label_centered(d, fonts, line, cx, 150.0 + i as f32 * 40.0, 24.0, HUD_TEXT);
            }
            draw_label_centered(d, fonts, "Enter or Esc to go back", cx, road.screen_height - 50.0, 22.0, HUD_TEXT);
        }
        Screens::HighScores => {
            shade_screen(d, &road);
            draw_label_centered(d, fonts, "HIGH SCORES", cx, 40.0, 48.0, HUD_ACCENT);
            let scores: Vec<u64> = world
                .get_resource::<HighScores>()
                .map(|t| t.iter().take(10).collect())
                .unwrap_or_default();
            if scores.is_empty() {
                draw_label_centered(d, fonts, "No races yet", cx, 140.0, 28.0, HUD_TEXT);
            }
            for (i, score) in scores.iter().enumerate() {
                let line = format!("{:>2}. {:>8}", i + 1, score);
                draw_label_centered(d, fonts, &line, cx, 110.0 + i as f32 * 36.0, 28.0, HUD_TEXT);
            }
            draw_label_centered(d, fonts, "Enter to go back", cx, road.screen_height - 50.0, 22.0, HUD_TEXT);
        }
        Screens::Playing | Screens::Quitting => {}
    }
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
    for (collider, position) in colliders.iter(world) {
        let aabb = collider.aabb(position.pos);
        d.draw_rectangle_lines_ex(
            Rectangle {
                x: aabb.min.x,
                y: aabb.min.y,
                width: aabb.width(),
                height: aabb.height(),
            },
            1.0,
            Color::RED,
        );
    }

    let fps = d.get_fps();
    let entity_count = world.entities().len();
    let state = world.resource::<GameState>();
    let lines = [
        format!("DEBUG (F11) | FPS: {}", fps),
        format!("Entities: {}", entity_count),
        format!(
            "Scroll {:.0} px/s  Difficulty {:.1}  Spawn every {:.2}s",
            state.scroll_speed,
            state.difficulty,
            state.spawn_period()
        ),
    ];
    for (i, line) in lines.iter().enumerate() {
        d.draw_text(line, 10, 110 + i as i32 * 14, 10, Color::WHITE);
    }
}

/// Draw one complete frame.
pub fn render_frame(world: &mut World, d: &mut RaylibDrawHandle, textures: &TextureStore, fonts: &FontStore) {
    render_road(world, d, textures);
    render_sprites(world, d, textures);
    render_effects(world, d, fonts);
    if matches!(
        world.resource::<Screen>().get(),
        Screens::Playing | Screens::Paused | Screens::GameOver
    ) {
        render_hud(world, d, fonts);
    }
    render_overlay(world, d, fonts);
    render_debug_ui(world, d);
}
