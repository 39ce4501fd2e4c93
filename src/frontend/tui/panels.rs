//! Content panels, one renderer per `PanelKind`
//!
//! Renderers are plain functions looked up in a table; they only see the
//! content and the active mode. Exploration modes use the zone's in-world
//! name as heading, the others its plain title, and the mobile view drops
//! long descriptions.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::colors::{self, BROWN, GOLD, MUTED, PARCHMENT};
use crate::content::{Avatar, ContentCatalog};
use crate::core::mode::PresentationMode;
use crate::core::zone::{PanelKind, ZoneId};

/// What a panel renderer may look at
pub struct PanelContext<'a> {
    pub catalog: &'a ContentCatalog,
    pub avatar: &'a Avatar,
    pub mode: PresentationMode,
}

impl PanelContext<'_> {
    fn compact(&self) -> bool {
        self.mode == PresentationMode::Mobile
    }
}

type PanelRenderer = fn(&PanelContext<'_>) -> Vec<Line<'static>>;

/// Indexed by `PanelKind::index()`
const PANELS: [PanelRenderer; PanelKind::COUNT] = [
    hero_lines,
    biography_lines,
    education_lines,
    certification_lines,
    project_lines,
    skill_lines,
    contact_lines,
];

pub fn panel_lines(kind: PanelKind, ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    PANELS[kind.index()](ctx)
}

/// Heading plus body of a zone's panel
pub fn zone_lines(zone: ZoneId, ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let content = ctx.catalog.zone(zone);
    let heading = if ctx.mode.is_exploration() {
        content.name.clone()
    } else {
        content.heading().to_string()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", content.icon),
                Style::default().fg(colors::zone_color(&content.color)),
            ),
            Span::styled(
                heading,
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
    ];
    lines.extend(panel_lines(zone.panel(), ctx));
    lines
}

/// Render a zone panel into `area`, scrolled by `scroll` lines
pub fn render_zone(zone: ZoneId, ctx: &PanelContext<'_>, scroll: u16, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    Paragraph::new(zone_lines(zone, ctx))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(area, buf);
}

fn text(s: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(s.into(), Style::default().fg(PARCHMENT)))
}

fn muted(s: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(s.into(), Style::default().fg(MUTED)))
}

fn title(s: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        s.into(),
        Style::default().fg(PARCHMENT).add_modifier(Modifier::BOLD),
    ))
}

fn tags(items: &[String]) -> Line<'static> {
    let spans: Vec<Span<'static>> = items
        .iter()
        .flat_map(|t| {
            [
                Span::styled(format!("[{}]", t), Style::default().fg(GOLD)),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

fn hero_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let profile = &ctx.catalog.profile;
    let avatar_style = if ctx.avatar.placeholder {
        Style::default().fg(BROWN).bg(GOLD)
    } else {
        Style::default().fg(GOLD)
    };

    let mut lines: Vec<Line<'static>> = ctx
        .avatar
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), avatar_style)))
        .collect();
    lines.push(Line::default());
    lines.push(title(profile.name.clone()));
    if !profile.title.is_empty() {
        lines.push(Line::from(Span::styled(
            profile.title.clone(),
            Style::default().fg(GOLD),
        )));
    }
    if !profile.tagline.is_empty() {
        lines.push(text(profile.tagline.clone()));
    }

    if !ctx.compact() && !profile.highlights.is_empty() {
        lines.push(Line::default());
        for highlight in &profile.highlights {
            lines.push(text(format!("★ {}", highlight)));
        }
    }
    lines
}

fn biography_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for paragraph in &ctx.catalog.biography.paragraphs {
        lines.push(text(paragraph.clone()));
        lines.push(Line::default());
    }
    if !ctx.catalog.inventory.is_empty() && ctx.mode.is_exploration() {
        lines.push(muted("Carries:"));
        for item in &ctx.catalog.inventory {
            lines.push(text(format!("  • {}", item.name)));
        }
    }
    lines
}

fn education_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in &ctx.catalog.education {
        lines.push(title(entry.title.clone()));
        if !entry.period.is_empty() {
            lines.push(muted(entry.period.clone()));
        }
        if !ctx.compact() && !entry.summary.is_empty() {
            lines.push(text(entry.summary.clone()));
        }
        if !entry.tags.is_empty() {
            lines.push(tags(&entry.tags));
        }
        lines.push(Line::default());
    }
    lines
}

fn certification_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    // Featured certifications first, otherwise in content order
    let mut certs: Vec<_> = ctx.catalog.certifications.iter().collect();
    certs.sort_by_key(|c| !c.featured);

    for cert in certs {
        let marker = if cert.featured { "★ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(GOLD)),
            Span::styled(
                cert.name.clone(),
                Style::default().fg(PARCHMENT).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(muted(format!("  {} · {}", cert.issuer, cert.date)));
        if !ctx.compact() && !cert.description.is_empty() {
            lines.push(text(format!("  {}", cert.description)));
        }
    }
    lines
}

fn project_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for project in &ctx.catalog.projects {
        lines.push(title(project.name.clone()));
        if !ctx.compact() && !project.description.is_empty() {
            lines.push(text(project.description.clone()));
        }
        if !project.tags.is_empty() {
            lines.push(tags(&project.tags));
        }
        if let Some(link) = &project.link {
            lines.push(muted(format!("↗ {}", link)));
        }
        lines.push(Line::default());
    }
    lines
}

fn skill_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for category in &ctx.catalog.skills {
        lines.push(title(category.category.clone()));
        if ctx.compact() {
            lines.push(text(category.items.join(", ")));
        } else {
            lines.push(tags(&category.items));
        }
    }
    lines
}

fn contact_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, link) in ctx.catalog.contact.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", link.label),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(link.value.clone(), Style::default().fg(PARCHMENT)),
        ]));
        if idx == 0 && !link.url.is_empty() {
            lines.push(muted("           press y to copy"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::catalog;

    fn flatten(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_every_zone_has_a_panel() {
        let catalog = catalog();
        let avatar = Avatar::placeholder();
        for mode in PresentationMode::ALL {
            let ctx = PanelContext {
                catalog: &catalog,
                avatar: &avatar,
                mode,
            };
            for zone in ZoneId::ALL {
                let lines = zone_lines(zone, &ctx);
                assert!(lines.len() > 2, "{} panel is empty in {} mode", zone, mode);
            }
        }
    }

    #[test]
    fn test_heading_depends_on_mode() {
        let catalog = catalog();
        let avatar = Avatar::placeholder();
        let explore = PanelContext {
            catalog: &catalog,
            avatar: &avatar,
            mode: PresentationMode::Explore,
        };
        let feed = PanelContext {
            catalog: &catalog,
            avatar: &avatar,
            mode: PresentationMode::Feed,
        };
        assert!(flatten(&zone_lines(ZoneId::Certifications, &explore)).contains("Certification Scrolls"));
        assert!(flatten(&zone_lines(ZoneId::Certifications, &feed)).starts_with("Π Certifications"));
    }

    #[test]
    fn test_featured_certifications_first() {
        let catalog = catalog();
        let avatar = Avatar::placeholder();
        let ctx = PanelContext {
            catalog: &catalog,
            avatar: &avatar,
            mode: PresentationMode::Grid,
        };
        let body = flatten(&panel_lines(PanelKind::Certifications, &ctx));
        assert!(body.starts_with("★ AWS Certified DevOps Engineer - Professional"));
    }

    #[test]
    fn test_mobile_drops_descriptions() {
        let catalog = catalog();
        let avatar = Avatar::placeholder();
        let mobile = PanelContext {
            catalog: &catalog,
            avatar: &avatar,
            mode: PresentationMode::Mobile,
        };
        let body = flatten(&panel_lines(PanelKind::Projects, &mobile));
        assert!(body.contains("Py-Dex"));
        assert!(!body.contains("terminal-based educational game"));
    }

    #[test]
    fn test_render_zone_writes_heading() {
        let catalog = catalog();
        let avatar = Avatar::placeholder();
        let ctx = PanelContext {
            catalog: &catalog,
            avatar: &avatar,
            mode: PresentationMode::Feed,
        };
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        render_zone(ZoneId::Contact, &ctx, 0, area, &mut buf);

        let first_row: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(first_row.contains("Contact"), "{:?}", first_row);
    }
}
