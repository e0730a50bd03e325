//! Parser für Strecken-Settings (XML).

use super::settings::{CameraSettings, LightSettings, TrackSettings, WindowSettings};
use anyhow::bail;
use anyhow::{Context, Result};
use glam::{Vec3, Vec4};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// Liest und parst eine Settings-Datei.
pub fn load_track_settings(path: &Path) -> Result<TrackSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Settings-Datei '{}' nicht lesbar", path.display()))?;
    let settings = parse_track_settings(&content)
        .with_context(|| format!("Settings-Datei '{}' ungültig", path.display()))?;
    log::info!(
        "Settings '{}' geladen: {} Kurven",
        settings.name,
        settings.curves.len()
    );
    Ok(settings)
}

/// Punkt im Aufbau: Komponenten kommen als einzelne Kind-Elemente.
#[derive(Default)]
struct PartialVector {
    components: [Option<f32>; 4],
}

impl PartialVector {
    fn set(&mut self, axis: &str, text: &str) -> Result<()> {
        let index = match axis {
            "X" | "R" => 0,
            "Y" | "G" => 1,
            "Z" | "B" => 2,
            "A" => 3,
            _ => return Ok(()),
        };
        let value = text
            .trim()
            .parse::<f32>()
            .with_context(|| format!("Ungültige Zahl in <{}>: '{}'", axis, text))?;
        self.components[index] = Some(value);
        Ok(())
    }

    fn vec3(&self, element: &str) -> Result<Vec3> {
        match self.components {
            [Some(x), Some(y), Some(z), _] => Ok(Vec3::new(x, y, z)),
            _ => bail!("<{}> braucht X, Y und Z", element),
        }
    }

    fn vec4(&self, element: &str) -> Result<Vec4> {
        match self.components {
            [Some(r), Some(g), Some(b), Some(a)] => Ok(Vec4::new(r, g, b, a)),
            _ => bail!("<{}> braucht R, G, B und A", element),
        }
    }
}

/// Parsed Strecken-Settings aus einem XML-String.
///
/// Erwarteter Aufbau unter dem (beliebig benannten) Wurzelelement:
/// `Window` (Titel, X, Y, Breite, Höhe in dieser Reihenfolge), `Model`,
/// `Camera` (`Position`, `LookAt`), `Track` (Kurven mit Punkten aus X/Y/Z)
/// und optional `Light` (`Ambient`, `Diffuse`, `Position`).
pub fn parse_track_settings(xml_content: &str) -> Result<TrackSettings> {
    // Kein trim_text: Leerzeichen um Entities gehören zum Text, getrimmt wird pro Feld
    let mut reader = Reader::from_str(xml_content);

    let mut buffer = Vec::new();
    let mut stack: Vec<String> = Vec::new();

    let mut name: Option<String> = None;
    let mut window = WindowSettings::default();
    let mut window_child = 0usize;
    let mut model_filename: Option<String> = None;

    let mut camera_position: Option<Vec3> = None;
    let mut camera_look_at: Option<Vec3> = None;
    let mut has_track = false;
    let mut curves: Vec<Vec<Vec3>> = Vec::new();
    let mut light: Option<LightSettings> = None;

    let mut vector = PartialVector::default();
    // Textinhalt des aktuell offenen Elements, inkl. aufgelöster Entities
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let element = e.name();
                let tag = reader.decoder().decode(element.as_ref())?.into_owned();
                stack.push(tag);
                text.clear();

                match stack_path(&stack).as_slice() {
                    [root] => {
                        if name.is_some() {
                            bail!("Mehr als ein Wurzelelement");
                        }
                        name = Some(root.to_string());
                    }
                    [_, "Window", _] => window_child += 1,
                    [_, "Track"] => has_track = true,
                    [_, "Track", _] => curves.push(Vec::new()),
                    [_, "Light"] => {
                        light.get_or_insert_with(LightSettings::default);
                    }
                    [_, "Camera", _] | [_, "Track", _, _] | [_, "Light", _] => {
                        vector = PartialVector::default();
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => text.push_str(&e.xml_content()?),
            Ok(Event::GeneralRef(e)) => {
                if let Some(ch) = e.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let entity = e.decode()?;
                    match resolve_predefined_entity(&entity) {
                        Some(resolved) => text.push_str(resolved),
                        None => bail!("Unbekannte Entity '&{};'", entity),
                    }
                }
            }
            Ok(Event::End(_)) => {
                match stack_path(&stack).as_slice() {
                    [_, "Window", field] => {
                        apply_window_field(&mut window, window_child, field, &text)?
                    }
                    [_, "Model", _] => {
                        if model_filename.is_none() {
                            model_filename = Some(text.trim().to_string());
                        }
                    }
                    [_, "Camera", _, axis] | [_, "Track", _, _, axis] | [_, "Light", _, axis] => {
                        vector.set(axis, &text)?
                    }
                    [_, "Camera", "Position"] => camera_position = Some(vector.vec3("Position")?),
                    [_, "Camera", "LookAt"] => camera_look_at = Some(vector.vec3("LookAt")?),
                    [_, "Track", _, point] => {
                        let point = vector.vec3(point)?;
                        if let Some(curve) = curves.last_mut() {
                            curve.push(point);
                        }
                    }
                    [_, "Light", "Ambient"] => {
                        if let Some(light) = light.as_mut() {
                            light.ambient = vector.vec4("Ambient")?;
                        }
                    }
                    [_, "Light", "Diffuse"] => {
                        if let Some(light) = light.as_mut() {
                            light.diffuse = vector.vec4("Diffuse")?;
                        }
                    }
                    [_, "Light", "Position"] => {
                        if let Some(light) = light.as_mut() {
                            light.position = vector.vec3("Position")?;
                        }
                    }
                    _ => {}
                }
                stack.pop();
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    let Some(name) = name else {
        bail!("Kein gültiges Wurzelelement gefunden");
    };
    if !has_track {
        bail!("<Track> fehlt");
    }
    validate_curves(&curves)?;

    let camera = match (camera_position, camera_look_at) {
        (Some(position), Some(look_at)) => Some(CameraSettings { position, look_at }),
        (None, None) => None,
        _ => bail!("<Camera> braucht Position und LookAt"),
    };

    Ok(TrackSettings {
        name,
        window,
        model_filename,
        camera,
        curves,
        light,
    })
}

/// Tag-Pfad als `&str`-Slice für Pattern-Matching.
fn stack_path(stack: &[String]) -> Vec<&str> {
    stack.iter().map(String::as_str).collect()
}

/// Fenster-Felder werden über ihre Position zugeordnet.
fn apply_window_field(
    window: &mut WindowSettings,
    position: usize,
    field: &str,
    text: &str,
) -> Result<()> {
    let text = text.trim();
    let number = || {
        text.parse::<i32>()
            .with_context(|| format!("Ungültige Ganzzahl in <Window>/<{}>: '{}'", field, text))
    };
    match position {
        1 => window.title = text.to_string(),
        2 => window.x_pos = number()?,
        3 => window.y_pos = number()?,
        4 => window.width = number()?.max(0) as u32,
        5 => window.height = number()?.max(0) as u32,
        _ => log::debug!("Unbekanntes Fenster-Feld <{}> ignoriert", field),
    }
    Ok(())
}

/// Erste Kurve: vier Punkte, jede weitere: Handle + Anker.
fn validate_curves(curves: &[Vec<Vec3>]) -> Result<()> {
    let Some(first) = curves.first() else {
        bail!("<Track> enthält keine Kurve");
    };
    if first.len() != 4 {
        bail!(
            "Erste Kurve braucht genau 4 Punkte, gefunden: {}",
            first.len()
        );
    }
    for (i, curve) in curves.iter().enumerate().skip(1) {
        if curve.len() != 2 {
            bail!(
                "Kurve {} braucht genau 2 Punkte (Handle, Anker), gefunden: {}",
                i + 1,
                curve.len()
            );
        }
    }
    Ok(())
}
