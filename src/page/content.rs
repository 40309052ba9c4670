//! Static content shown while a section is active

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Heading(String),
    Subheading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    Links(Vec<Link>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

impl SectionContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(ContentBlock::Heading(text.into()));
        self
    }

    pub fn subheading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(ContentBlock::Subheading(text.into()));
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(ContentBlock::Paragraph(text.into()));
        self
    }

    pub fn bullets<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks
            .push(ContentBlock::Bullets(items.into_iter().map(Into::into).collect()));
        self
    }

    pub fn links(mut self, links: Vec<Link>) -> Self {
        self.blocks.push(ContentBlock::Links(links));
        self
    }

    /// Rough pixel height of the content, used to stretch sections taller than a viewport
    pub fn estimated_height(&self, line_height: f32) -> f32 {
        let lines: usize = self
            .blocks
            .iter()
            .map(|block| match block {
                ContentBlock::Heading(_) => 2,
                ContentBlock::Subheading(_) => 1,
                ContentBlock::Paragraph(text) => 1 + text.len() / 80,
                ContentBlock::Bullets(items) => items.len(),
                ContentBlock::Links(links) => links.len(),
            })
            .sum();
        (lines + 2) as f32 * line_height
    }
}

/// Two-digit badge for a section, counting from one
pub fn section_badge(order: usize) -> String {
    format!("{:02}", order + 1)
}

/// Opacity ramp played each time a section becomes active
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFade {
    elapsed: f32,
    duration: f32,
}

impl SectionFade {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.elapsed = (self.elapsed + delta_time.max(0.0)).min(self.duration);
    }

    pub fn opacity(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}
