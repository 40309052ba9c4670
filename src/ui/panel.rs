//! Page overlay panels: navbar, active section content and scroll indicator
//!
//! [`OverlayModel`] snapshots what the overlay shows so it can be built (and tested)
//! without an ImGui context; [`page_overlay`] draws it.

use imgui::{Condition, StyleVar, WindowFlags};

use crate::{
    narrative::FrameOutput,
    page::{section_badge, ContentBlock, Page, Portfolio, SectionContent},
};

const NAVBAR_HEIGHT: f32 = 56.0;
const CONTENT_WIDTH_FRACTION: f32 = 0.38;
const INDICATOR_WIDTH: f32 = 6.0;
const ACCENT: [f32; 4] = [0.55, 0.75, 1.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub label: String,
    pub section: String,
    pub active: bool,
}

/// Everything the overlay draws for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayModel {
    pub nav: Vec<NavEntry>,
    pub navbar_scrolled: bool,
    pub badge: Option<String>,
    pub content: Option<SectionContent>,
    pub opacity: f32,
    pub progress: f32,
    /// Name of the focused body, if any
    pub focus_label: Option<String>,
}

impl OverlayModel {
    pub fn build(portfolio: &Portfolio, page: &Page, frame: &FrameOutput) -> Self {
        let active = page.active_section();
        let active_identifier =
            active.and_then(|order| page.sections().get(order as i64).map(|s| s.identifier.as_str()));

        let nav = portfolio
            .nav_links()
            .into_iter()
            .map(|(label, section)| NavEntry {
                label: label.to_string(),
                section: section.to_string(),
                active: Some(section) == active_identifier,
            })
            .collect();

        Self {
            nav,
            navbar_scrolled: page.is_scrolled(),
            badge: active.map(section_badge),
            content: active.and_then(|order| portfolio.content(order)).cloned(),
            opacity: page.content_opacity(),
            progress: page.progress(),
            focus_label: frame.focus.object_id().map(str::to_string),
        }
    }
}

/// Draws the overlay; returns the section whose nav link was clicked
pub fn page_overlay(ui: &imgui::Ui, model: &OverlayModel) -> Option<String> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }

    let clicked = navbar(ui, model, display_size);
    section_panel(ui, model, display_size);
    scroll_indicator(ui, model, display_size);
    clicked
}

fn overlay_flags() -> WindowFlags {
    WindowFlags::NO_DECORATION
        | WindowFlags::NO_MOVE
        | WindowFlags::NO_SAVED_SETTINGS
        | WindowFlags::NO_FOCUS_ON_APPEARING
        | WindowFlags::NO_NAV
}

fn navbar(ui: &imgui::Ui, model: &OverlayModel, display_size: [f32; 2]) -> Option<String> {
    let mut clicked = None;
    // Solid once the page has scrolled, transparent at the top
    let bg_alpha = if model.navbar_scrolled { 0.85 } else { 0.0 };

    ui.window("##navbar")
        .position([0.0, 0.0], Condition::Always)
        .size([display_size[0], NAVBAR_HEIGHT], Condition::Always)
        .flags(overlay_flags())
        .bg_alpha(bg_alpha)
        .build(|| {
            if ui.button("Orrery") {
                clicked = Some(crate::narrative::HOME.to_string());
            }
            for entry in &model.nav {
                ui.same_line();
                let label = if entry.active {
                    format!("[{}]##{}", entry.label, entry.section)
                } else {
                    format!("{}##{}", entry.label, entry.section)
                };
                if ui.button(label) {
                    clicked = Some(entry.section.clone());
                }
            }
            if let Some(focus) = &model.focus_label {
                ui.same_line();
                ui.text_colored(ACCENT, format!("  -> {}", focus));
            }
        });

    clicked
}

fn section_panel(ui: &imgui::Ui, model: &OverlayModel, display_size: [f32; 2]) {
    let Some(content) = &model.content else {
        return;
    };

    let width = display_size[0] * CONTENT_WIDTH_FRACTION;
    let _alpha = ui.push_style_var(StyleVar::Alpha(model.opacity.clamp(0.0, 1.0)));

    ui.window("##section")
        .position([24.0, NAVBAR_HEIGHT + 24.0], Condition::Always)
        .size(
            [width, display_size[1] - NAVBAR_HEIGHT - 48.0],
            Condition::Always,
        )
        .flags(overlay_flags())
        .bg_alpha(0.35)
        .build(|| {
            if let Some(badge) = &model.badge {
                ui.text_colored(ACCENT, badge);
                ui.same_line();
            }
            ui.text(&content.title);
            ui.separator();
            ui.spacing();

            for block in &content.blocks {
                match block {
                    ContentBlock::Heading(text) => {
                        ui.spacing();
                        ui.text(text);
                    }
                    ContentBlock::Subheading(text) => ui.text_colored(ACCENT, text),
                    ContentBlock::Paragraph(text) => ui.text_wrapped(text),
                    ContentBlock::Bullets(items) => {
                        for item in items {
                            ui.bullet_text(item);
                        }
                    }
                    ContentBlock::Links(links) => {
                        for link in links {
                            ui.text(format!("{}: {}", link.label, link.href));
                        }
                    }
                }
                ui.spacing();
            }
        });
}

fn scroll_indicator(ui: &imgui::Ui, model: &OverlayModel, display_size: [f32; 2]) {
    let top = NAVBAR_HEIGHT;
    let track = display_size[1] - top;
    let x = display_size[0] - INDICATOR_WIDTH;

    let draw_list = ui.get_foreground_draw_list();
    draw_list
        .add_rect([x, top], [display_size[0], display_size[1]], [1.0, 1.0, 1.0, 0.08])
        .filled(true)
        .build();
    draw_list
        .add_rect(
            [x, top],
            [display_size[0], top + track * model.progress.clamp(0.0, 1.0)],
            ACCENT,
        )
        .filled(true)
        .build();
}
