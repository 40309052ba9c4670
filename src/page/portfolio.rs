//! Static description of the page and its scene: sections, content and bodies
//!
//! This is the composition root's data. It builds the [`SectionList`] and the
//! [`SceneObjectRegistry`] the narrative core runs on, and carries the placeholder
//! visuals the renderer draws for each body.

use cgmath::Vector3;

use crate::narrative::{
    Attachment, FocusTarget, NarrativeError, SceneObjectRegistry, SectionList,
};

use super::content::{Link, SectionContent};

/// Placeholder appearance of a body; real model loading lives outside this crate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyVisual {
    pub radius: f32,
    pub color: [f32; 3],
    /// 0 = lit only by the star, 1 = fully self-illuminated
    pub emissive: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub identifier: String,
    pub base_position: [f32; 3],
    /// Own-axis rotation in radians per second
    pub rotation_speed: f32,
    pub attachment: Attachment,
    pub visual: BodyVisual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub identifier: String,
    /// Navbar label; `None` keeps the section out of the navbar
    pub nav_label: Option<String>,
    pub focus_target: FocusTarget,
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub sections: Vec<SectionSpec>,
    pub bodies: Vec<BodySpec>,
}

/// Planet spin: 0.005 rad per frame at 60 Hz
const PLANET_SPIN: f32 = 0.3;
/// Star spin: 0.002 rad per frame at 60 Hz
const STAR_SPIN: f32 = 0.12;

impl Portfolio {
    pub fn section_list(&self) -> Result<SectionList, NarrativeError> {
        SectionList::new(
            self.sections
                .iter()
                .map(|s| (s.identifier.clone(), s.focus_target.clone())),
        )
    }

    pub fn registry(&self) -> Result<SceneObjectRegistry, NarrativeError> {
        let mut registry = SceneObjectRegistry::new();
        for body in &self.bodies {
            let position = Vector3::from(body.base_position);
            match body.attachment {
                Attachment::Orbiting => {
                    registry.register_object(&body.identifier, position, body.rotation_speed)?
                }
                Attachment::Fixed => {
                    registry.register_fixed(&body.identifier, position, body.rotation_speed)?
                }
            }
        }
        Ok(registry)
    }

    pub fn content(&self, order: usize) -> Option<&SectionContent> {
        self.sections.get(order).map(|s| &s.content)
    }

    pub fn body(&self, identifier: &str) -> Option<&BodySpec> {
        self.bodies.iter().find(|b| b.identifier == identifier)
    }

    /// `(label, section identifier)` for every section shown in the navbar
    pub fn nav_links(&self) -> Vec<(&str, &str)> {
        self.sections
            .iter()
            .filter_map(|s| {
                s.nav_label
                    .as_deref()
                    .map(|label| (label, s.identifier.as_str()))
            })
            .collect()
    }
}

fn section(
    identifier: &str,
    nav_label: Option<&str>,
    focus_target: &str,
    content: SectionContent,
) -> SectionSpec {
    SectionSpec {
        identifier: identifier.to_string(),
        nav_label: nav_label.map(str::to_string),
        focus_target: FocusTarget::parse(focus_target),
        content,
    }
}

fn planet(identifier: &str, position: [f32; 3], radius: f32, color: [f32; 3]) -> BodySpec {
    BodySpec {
        identifier: identifier.to_string(),
        base_position: position,
        rotation_speed: PLANET_SPIN,
        attachment: Attachment::Orbiting,
        visual: BodyVisual {
            radius,
            color,
            emissive: 0.15,
        },
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        let sections = vec![
            section(
                "home",
                None,
                "home",
                SectionContent::new("Home")
                    .subheading("Hi, my name is")
                    .heading("Orrery Explorer.")
                    .subheading("I build digital universes.")
                    .paragraph(
                        "A computer engineering student who enjoys systems programming, \
                         real-time graphics and crafting interfaces people like to use.",
                    )
                    .links(vec![Link::new("Download my CV", "./cv.pdf")]),
            ),
            section(
                "about",
                Some("About"),
                "coruscant",
                SectionContent::new("About Me")
                    .paragraph(
                        "I started programming by modding games and never stopped. These \
                         days I mostly write Rust, with a soft spot for renderers and \
                         tooling.",
                    )
                    .paragraph(
                        "Outside of code I read science fiction and sketch imaginary \
                         planets, which is roughly how this page came to be.",
                    ),
            ),
            section(
                "skills",
                Some("Skills"),
                "qonos",
                SectionContent::new("Skills")
                    .subheading("Languages")
                    .bullets(["Rust", "C++", "TypeScript", "Python", "SQL"])
                    .subheading("Tools")
                    .bullets(["wgpu", "Git", "Docker", "Linux", "Blender"]),
            ),
            section(
                "projects",
                Some("Projects"),
                "amethyst",
                SectionContent::new("Projects")
                    .subheading("Orrery")
                    .paragraph("This page: a scroll-driven tour of a small solar system.")
                    .subheading("Packet Scope")
                    .paragraph("A terminal UI for inspecting captured network traffic.")
                    .subheading("Tile Forge")
                    .paragraph("A procedural tilemap generator with a live preview."),
            ),
            section(
                "experience",
                Some("Experience"),
                "ashfall",
                SectionContent::new("Experience")
                    .subheading("Graphics Intern")
                    .bullets([
                        "Ported a legacy OpenGL viewer to a modern GPU API",
                        "Cut frame times on large scenes by batching draws",
                    ])
                    .subheading("Teaching Assistant, Data Structures")
                    .bullets(["Ran weekly labs", "Wrote autograded assignments"]),
            ),
            section(
                "contact",
                Some("Contact"),
                "cybertron",
                SectionContent::new("Contact")
                    .paragraph("Open to internships and collaborations. Say hello!")
                    .links(vec![
                        Link::new("Email", "mailto:hello@example.com"),
                        Link::new("GitHub", "https://github.com/"),
                        Link::new("LinkedIn", "https://www.linkedin.com/"),
                    ]),
            ),
        ];

        let bodies = vec![
            BodySpec {
                identifier: "sun".to_string(),
                base_position: [0.0, 0.0, 0.0],
                rotation_speed: STAR_SPIN,
                attachment: Attachment::Fixed,
                visual: BodyVisual {
                    radius: 1.2,
                    color: [1.0, 0.67, 0.0],
                    emissive: 1.0,
                },
            },
            planet("coruscant", [-2.0, -1.0, 6.0], 0.5, [0.85, 0.6, 0.3]),
            planet("qonos", [-4.0, 1.0, 4.0], 0.5, [0.3, 0.75, 0.35]),
            planet("ashfall", [6.0, -1.0, 5.0], 0.6, [0.75, 0.35, 0.25]),
            planet("amethyst", [-5.0, 0.0, -6.0], 0.8, [0.55, 0.35, 0.85]),
            planet("cybertron", [3.0, 2.0, 7.0], 0.55, [0.6, 0.65, 0.75]),
        ];

        Self { sections, bodies }
    }
}
