//! Plain-text rendering of list views and records.

use muse_admin::{ListView, Phase, Row};
use muse_core::{Art, ArtType, Entity};
use std::fmt::Write;

/// Column layout for one entity kind.
pub trait Render: Entity {
    fn headers() -> &'static [&'static str];

    fn cells(&self, categories: &[ArtType]) -> Vec<String>;

    /// Field/value pairs for `show`.
    fn details(&self, categories: &[ArtType]) -> Vec<(&'static str, String)>;
}

fn yes_no(active: bool) -> String {
    let label = if active { "sí" } else { "no" };
    label.to_string()
}

impl Render for ArtType {
    fn headers() -> &'static [&'static str] {
        &["ID", "NOMBRE", "DESCRIPCIÓN", "ACTIVO"]
    }

    fn cells(&self, _categories: &[ArtType]) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            yes_no(self.active),
        ]
    }

    fn details(&self, _categories: &[ArtType]) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Nombre", self.name.clone()),
            ("Descripción", self.description.clone()),
            ("Activo", yes_no(self.active)),
        ]
    }
}

impl Render for Art {
    fn headers() -> &'static [&'static str] {
        &["ID", "TÍTULO", "TIPO", "FECHA", "ACTIVO"]
    }

    fn cells(&self, categories: &[ArtType]) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.category_label(categories).to_string(),
            self.creation_date(),
            yes_no(self.active),
        ]
    }

    fn details(&self, categories: &[ArtType]) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Título", self.title.clone()),
            ("Descripción", self.description.clone()),
            ("Fecha de creación", self.creation_date()),
            ("Tipo de arte", self.category_label(categories).to_string()),
            ("Imagen", self.image_url.clone().unwrap_or_default()),
            ("Activo", yes_no(self.active)),
        ]
    }
}

/// Render a list snapshot as an aligned table. Highlighted rows get a `*`.
pub fn table<E: Render>(view: &ListView<E>) -> String {
    let mut out = String::new();
    if view.phase == Phase::Loading {
        out.push_str("Cargando...\n");
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    }
    if let Some(success) = &view.success {
        let _ = writeln!(out, "{success}");
    }
    if view.rows.is_empty() {
        let _ = writeln!(out, "No hay {} registrados.", E::KIND.plural);
        return out;
    }

    let headers: Vec<String> = E::headers().iter().map(|h| (*h).to_string()).collect();
    let rows: Vec<(bool, Vec<String>)> = view
        .rows
        .iter()
        .map(|Row { record, highlighted, .. }| (*highlighted, record.cells(&view.categories)))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for (_, cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(&mut out, ' ', &headers, &widths);
    for (highlighted, cells) in &rows {
        write_line(&mut out, if *highlighted { '*' } else { ' ' }, cells, &widths);
    }
    out
}

fn write_line(out: &mut String, marker: char, cells: &[String], widths: &[usize]) {
    out.push(marker);
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        let _ = write!(out, " {cell}{}", " ".repeat(pad));
        out.push(' ');
    }
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

/// Render one record as `field: value` lines.
pub fn details<E: Render>(record: &E, categories: &[ArtType]) -> String {
    let fields = record.details(categories);
    let width = fields
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (name, value) in fields {
        let pad = width - name.chars().count();
        let _ = writeln!(out, "{name}:{} {value}", " ".repeat(pad));
    }
    out
}
