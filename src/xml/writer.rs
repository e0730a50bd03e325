//! Writer für Strecken-Settings (XML).

use super::settings::TrackSettings;
use anyhow::{Context, Result};
use glam::{Vec3, Vec4};
use std::path::Path;

/// Schreibt Strecken-Settings im Format, das [`super::parse_track_settings`] liest.
pub fn write_track_settings(settings: &TrackSettings) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    output.push_str(&format!("<{}>\n", settings.name));

    let window = &settings.window;
    output.push_str("    <Window>\n");
    output.push_str(&format!(
        "        <Title>{}</Title>\n",
        escape_xml(&window.title)
    ));
    output.push_str(&format!("        <XPos>{}</XPos>\n", window.x_pos));
    output.push_str(&format!("        <YPos>{}</YPos>\n", window.y_pos));
    output.push_str(&format!("        <Width>{}</Width>\n", window.width));
    output.push_str(&format!("        <Height>{}</Height>\n", window.height));
    output.push_str("    </Window>\n");

    if let Some(ref filename) = settings.model_filename {
        output.push_str("    <Model>\n");
        output.push_str(&format!(
            "        <Filename>{}</Filename>\n",
            escape_xml(filename)
        ));
        output.push_str("    </Model>\n");
    }

    if let Some(camera) = settings.camera {
        output.push_str("    <Camera>\n");
        push_vec3(&mut output, "Position", camera.position, 2);
        push_vec3(&mut output, "LookAt", camera.look_at, 2);
        output.push_str("    </Camera>\n");
    }

    output.push_str("    <Track>\n");
    for curve in &settings.curves {
        output.push_str("        <Curve>\n");
        for point in curve {
            push_vec3(&mut output, "Point", *point, 3);
        }
        output.push_str("        </Curve>\n");
    }
    output.push_str("    </Track>\n");

    if let Some(light) = settings.light {
        output.push_str("    <Light>\n");
        push_rgba(&mut output, "Ambient", light.ambient);
        push_rgba(&mut output, "Diffuse", light.diffuse);
        push_vec3(&mut output, "Position", light.position, 2);
        output.push_str("    </Light>\n");
    }

    output.push_str(&format!("</{}>\n", settings.name));
    output
}

/// Schreibt die Settings in eine Datei.
pub fn save_track_settings(settings: &TrackSettings, path: &Path) -> Result<()> {
    std::fs::write(path, write_track_settings(settings))
        .with_context(|| format!("Settings-Datei '{}' nicht schreibbar", path.display()))?;
    log::info!(
        "Settings gespeichert: {} ({} Kurven)",
        path.display(),
        settings.curves.len()
    );
    Ok(())
}

fn push_vec3(output: &mut String, tag: &str, value: Vec3, depth: usize) {
    let indent = "    ".repeat(depth);
    output.push_str(&format!(
        "{indent}<{tag}><X>{}</X><Y>{}</Y><Z>{}</Z></{tag}>\n",
        format_float(value.x),
        format_float(value.y),
        format_float(value.z),
    ));
}

fn push_rgba(output: &mut String, tag: &str, value: Vec4) {
    output.push_str(&format!(
        "        <{tag}><R>{}</R><G>{}</G><B>{}</B><A>{}</A></{tag}>\n",
        format_float(value.x),
        format_float(value.y),
        format_float(value.z),
        format_float(value.w),
    ));
}

fn format_float(value: f32) -> String {
    format!("{:.4}", value)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
