use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::model::{BudgetTier, DurationBucket, Quest, CATEGORIES};
use crate::tui::constants::APP_VERSION;
use crate::tui::filters::{FilterColumn, FilterOverlay};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, format_date, format_price, inset_rect,
    short_id, BG_ACCENT, BG_BASE, BG_PANEL, FG_ACCENT,
};
use crate::tui::onboarding::{OnboardingFlow, SurveyStep, INTEREST_OPTIONS};

use super::{App, InputMode, Screen};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_body(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode {
            InputMode::Filter => self.draw_filter_overlay(f, size),
            InputMode::Survey => self.draw_survey_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::Normal | InputMode::Query => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" wander v{APP_VERSION} 🧭 "),
                Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {}", self.screen.description())),
        ];

        if let Some(summary) = self.spec.summary() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("🔍 {summary}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        f.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Screen::ALL.iter().map(|s| Line::from(s.label())).collect();
        let tabs = Tabs::new(titles)
            .select(self.screen.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(FG_ACCENT)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn draw_body(&mut self, f: &mut Frame<'_>, area: Rect) {
        if self.screen == Screen::Search {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(5), Constraint::Min(5)])
                .split(area);
            self.draw_search_panel(f, chunks[0]);
            self.draw_card_area(f, chunks[1]);
        } else {
            self.draw_card_area(f, area);
        }
    }

    fn draw_search_panel(&self, f: &mut Frame<'_>, area: Rect) {
        let editing = self.input_mode == InputMode::Query;
        let query = self.query_input.as_str();

        let mut query_spans = vec![Span::styled("🔍 ", Style::default().fg(FG_ACCENT))];
        if editing {
            let col = self.query_input.cursor_column();
            let chars: Vec<char> = query.chars().collect();
            let before: String = chars[..col].iter().collect();
            let after: String = chars[col..].iter().collect();
            query_spans.push(Span::raw(before));
            query_spans.push(Span::styled(
                "▏",
                Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
            ));
            query_spans.push(Span::raw(after));
        } else if query.is_empty() {
            query_spans.push(Span::styled(
                "Search destinations, activities...  (press / to type)",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            query_spans.push(Span::raw(query.to_string()));
        }

        let mut chip_spans: Vec<Span> = Vec::new();
        for category in &self.spec.categories {
            chip_spans.push(Span::styled(
                format!(" #{category} "),
                Style::default().fg(Color::Black).bg(FG_ACCENT),
            ));
            chip_spans.push(Span::raw(" "));
        }
        if let Some(duration) = self.spec.duration {
            chip_spans.push(Span::styled(
                format!(" {} ", duration.label()),
                Style::default().fg(Color::Black).bg(FG_ACCENT),
            ));
            chip_spans.push(Span::raw(" "));
        }
        if let Some(budget) = self.spec.budget {
            chip_spans.push(Span::styled(
                format!(" {} ", budget.as_str()),
                Style::default().fg(Color::Black).bg(FG_ACCENT),
            ));
            chip_spans.push(Span::raw(" "));
        }
        if chip_spans.is_empty() {
            chip_spans.push(Span::styled(
                "No filters — press f to pick categories, duration and budget",
                Style::default().fg(Color::DarkGray),
            ));
        }

        let tally = format!(
            "{} quest{} found",
            self.visible.len(),
            if self.visible.len() == 1 { "" } else { "s" }
        );

        let lines = vec![
            Line::from(query_spans),
            Line::from(chip_spans),
            Line::from(Span::styled(tally, Style::default().fg(Color::Gray))),
        ];

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(accent_title("Search"))
                .border_style(Style::default().fg(Color::DarkGray))
                .style(Style::default().bg(BG_PANEL)),
        );
        f.render_widget(panel, area);
    }

    fn draw_card_area(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.visible.is_empty() {
            let lines = self.empty_state_lines();
            let content = centered_rect(inner.width.min(60), (lines.len() as u16) + 2, inner);
            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL));
            f.render_widget(paragraph, content);
            return;
        }

        // Reserve a slim right-hand gutter for the position dots.
        let (card_area, dots_area) = if inner.width > 6 {
            let card = Rect {
                width: inner.width - 3,
                ..inner
            };
            let dots = Rect {
                x: inner.x + inner.width - 2,
                y: inner.y,
                width: 1,
                height: inner.height,
            };
            (card, Some(dots))
        } else {
            (inner, None)
        };

        if let Some(quest) = self.visible.get(self.current) {
            self.draw_card(f, card_area, quest);
        }
        if let Some(dots) = dots_area {
            self.draw_scroll_dots(f, dots);
        }
        if self.heart_since.is_some() {
            self.draw_heart_overlay(f, card_area);
        }
    }

    fn draw_card(&self, f: &mut Frame<'_>, area: Rect, quest: &Quest) {
        let content = inset_rect(area, 1);
        let lines = if self.flipped {
            self.card_back_lines(quest)
        } else {
            self.card_front_lines(quest)
        };
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(BG_PANEL));
        f.render_widget(paragraph, content);
    }

    fn card_front_lines(&self, quest: &Quest) -> Vec<Line<'static>> {
        let liked = self.liked.contains(&quest.id);
        let mut lines = Vec::new();

        lines.push(Line::from(vec![
            Span::styled(
                format!("📍 {}", quest.destination),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("   "),
            Span::styled(
                if liked { "♥ liked" } else { "♡" },
                if liked {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
        ]));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            quest.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            quest.description.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", quest.budget.as_str()),
                Style::default().fg(Color::Black).bg(FG_ACCENT),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" ⏱ {} ", quest.duration),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ),
        ]));

        if !quest.categories.is_empty() {
            lines.push(Line::default());
            let joined = quest
                .categories
                .iter()
                .map(|c| format!("#{c}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(
                joined,
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("🖼 {}", quest.cover_image),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "Space once to flip · twice quickly to like",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }

    fn card_back_lines(&self, quest: &Quest) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        lines.push(Line::from(vec![
            Span::styled(
                quest.title.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format_price(quest.total_price, &quest.currency),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("{} · added {}", quest.destination, format_date(&quest.created_at)),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::default());

        lines.push(accent_title("Activities Included"));
        if quest.activities.is_empty() {
            lines.push(Line::from(Span::styled(
                "No listed activities",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for activity in &quest.activities {
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", activity.name)),
                Span::styled(
                    format!("({})", activity.duration),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  ${}", activity.price.round() as i64),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        lines.push(Line::default());
        lines.push(accent_title("Itinerary Highlights"));
        for day in quest.itinerary.iter().take(3) {
            lines.push(Line::from(Span::styled(
                format!("  Day {}: {}", day.day, day.title),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            for item in &day.activities {
                lines.push(Line::from(Span::styled(
                    format!("    • {item}"),
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Space to flip back",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }

    fn draw_scroll_dots(&self, f: &mut Frame<'_>, area: Rect) {
        let count = self.visible.len();
        if count < 2 {
            return;
        }
        let shown = count.min(area.height as usize);
        let mut lines = Vec::with_capacity(shown);
        for idx in 0..shown {
            if idx == self.current.min(shown - 1) {
                lines.push(Line::from(Span::styled(
                    "●",
                    Style::default().fg(Color::White),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "·",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        let top_offset = (area.height.saturating_sub(shown as u16)) / 2;
        let dots_rect = Rect {
            y: area.y + top_offset,
            height: shown as u16,
            ..area
        };
        f.render_widget(Paragraph::new(lines), dots_rect);
    }

    fn draw_heart_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let rect = centered_rect(13, 3, area);
        f.render_widget(Clear, rect);
        let heart = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                "❤️  ❤️  ❤️",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().bg(BG_ACCENT));
        f.render_widget(heart, rect);
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let hints = match self.input_mode {
            InputMode::Query => "typing query…  Enter/Esc done",
            InputMode::Filter => "←/→ column  ↑/↓ move  Space toggle  Enter apply  Esc cancel",
            InputMode::Survey => "↑/↓ choose  Space select  Enter continue  Shift+Tab back",
            InputMode::Help => "Enter/Esc close help",
            InputMode::Normal => {
                "Space tap  l like  j/k swipe  / search  f filter  r refresh  h help  q quit"
            }
        };

        let mut lines = vec![Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))];
        if let Some(status) = &self.status {
            lines.push(Line::from(Span::styled(
                status.text.clone(),
                status.style(),
            )));
        } else if !self.visible.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(
                    "Quest {}/{} · {}",
                    self.current + 1,
                    self.visible.len(),
                    self.visible
                        .get(self.current)
                        .map(|q| short_id(&q.id))
                        .unwrap_or_default()
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_filter_overlay(&self, f: &mut Frame<'_>, size: Rect) {
        let Some(overlay) = &self.filter_overlay else {
            return;
        };

        let rect = centered_rect(size.width.min(70), size.height.min(19), size);
        f.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Filters"))
            .border_style(Style::default().fg(FG_ACCENT))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(inner);

        for column in FilterColumn::ALL {
            let area = columns[column.index()];
            self.draw_filter_column(f, area, overlay, column);
        }
    }

    fn draw_filter_column(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        overlay: &FilterOverlay,
        column: FilterColumn,
    ) {
        let active = overlay.column == column;
        let cursor = overlay.row_positions[column.index()];

        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            column.title(),
            if active {
                Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            },
        )));

        let rows: Vec<(String, bool)> = match column {
            FilterColumn::Categories => std::iter::once((column.clear_label().to_string(), false))
                .chain(CATEGORIES.iter().map(|category| {
                    (
                        format!("#{category}"),
                        overlay.working.categories.contains(*category),
                    )
                }))
                .collect(),
            FilterColumn::Duration => std::iter::once((column.clear_label().to_string(), false))
                .chain(DurationBucket::ALL.iter().map(|bucket| {
                    (
                        format!("{} ({})", bucket.label(), bucket.days_hint()),
                        overlay.working.duration == Some(*bucket),
                    )
                }))
                .collect(),
            FilterColumn::Budget => std::iter::once((column.clear_label().to_string(), false))
                .chain(BudgetTier::ALL.iter().map(|tier| {
                    (
                        format!("{} {}", tier.as_str(), tier.label()),
                        overlay.working.budget == Some(*tier),
                    )
                }))
                .collect(),
        };

        for (idx, (label, selected)) in rows.iter().enumerate() {
            let marker = if *selected { "☑" } else { "☐" };
            let mut style = Style::default().fg(Color::Gray);
            if *selected {
                style = Style::default().fg(FG_ACCENT);
            }
            if active && idx == cursor {
                style = style.bg(BG_ACCENT).add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(Span::styled(
                format!("{marker} {label}"),
                style,
            )));
        }

        f.render_widget(Paragraph::new(lines), inset_rect(area, 1));
    }

    fn draw_survey_overlay(&self, f: &mut Frame<'_>, size: Rect) {
        let Some(flow) = &self.survey else {
            return;
        };

        let rect = centered_rect(size.width.min(62), size.height.min(18), size);
        f.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Plan your wandering"))
            .border_style(Style::default().fg(FG_ACCENT))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let mut lines = Vec::new();

        let progress: Vec<Span> = SurveyStep::ALL
            .iter()
            .map(|step| {
                if step.index() <= flow.step().index() {
                    Span::styled("■ ", Style::default().fg(FG_ACCENT))
                } else {
                    Span::styled("□ ", Style::default().fg(Color::DarkGray))
                }
            })
            .collect();
        lines.push(Line::from(progress));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            flow.step().title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            flow.step().subtitle(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::default());

        match flow.step() {
            SurveyStep::Interests => {
                for (idx, option) in INTEREST_OPTIONS.iter().enumerate() {
                    let selected = flow.interests.contains(option.id);
                    let marker = if selected { "☑" } else { "☐" };
                    let mut style = if selected {
                        Style::default().fg(FG_ACCENT)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    if idx == flow.cursor() {
                        style = style.bg(BG_ACCENT).add_modifier(Modifier::BOLD);
                    }
                    lines.push(Line::from(Span::styled(
                        format!("{marker} {} {}", option.emoji, option.label),
                        style,
                    )));
                }
            }
            SurveyStep::HomeLocation => {
                let location = flow.location.as_str();
                lines.push(Line::from(vec![
                    Span::styled("📍 ", Style::default().fg(FG_ACCENT)),
                    if location.is_empty() {
                        Span::styled(
                            "e.g., New York, USA",
                            Style::default().fg(Color::DarkGray),
                        )
                    } else {
                        Span::raw(location.to_string())
                    },
                    Span::styled(
                        "▏",
                        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            SurveyStep::Budget => {
                for (idx, tier) in BudgetTier::ALL.iter().enumerate() {
                    let selected = flow.budget == Some(*tier);
                    let marker = if selected { "◉" } else { "○" };
                    let mut style = if selected {
                        Style::default().fg(FG_ACCENT)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    if idx == flow.cursor() {
                        style = style.bg(BG_ACCENT).add_modifier(Modifier::BOLD);
                    }
                    lines.push(Line::from(Span::styled(
                        format!(
                            "{marker} {}  {} — {}",
                            tier.as_str(),
                            tier.label(),
                            tier.range_hint()
                        ),
                        style,
                    )));
                }
            }
            SurveyStep::Duration => {
                for (idx, bucket) in DurationBucket::ALL.iter().enumerate() {
                    let selected = flow.duration == Some(*bucket);
                    let marker = if selected { "◉" } else { "○" };
                    let mut style = if selected {
                        Style::default().fg(FG_ACCENT)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    if idx == flow.cursor() {
                        style = style.bg(BG_ACCENT).add_modifier(Modifier::BOLD);
                    }
                    lines.push(Line::from(Span::styled(
                        format!("{marker} {} — {}", bucket.label(), bucket.days_hint()),
                        style,
                    )));
                }
            }
        }

        lines.push(Line::default());
        let action = if flow.is_last() {
            if flow.can_advance() {
                "Enter: Get Started"
            } else {
                "Pick a duration to finish"
            }
        } else if flow.can_advance() {
            "Enter: Continue"
        } else {
            "Answer this step to continue"
        };
        lines.push(Line::from(Span::styled(
            action,
            Style::default().fg(Color::Gray),
        )));

        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }),
            inset_rect(inner, 1),
        );
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, size: Rect) {
        let entries = build_help_lines();
        let rect = centered_rect(
            size.width.min(64),
            (entries.len() as u16 + 4).min(size.height),
            size,
        );
        f.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Keyboard reference"))
            .border_style(Style::default().fg(FG_ACCENT))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let lines: Vec<Line> = entries
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{keys:<18}"),
                        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*what, Style::default().fg(Color::Gray)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inset_rect(inner, 1));
    }

    fn empty_state_lines(&self) -> Vec<Line<'static>> {
        let (heading, hints): (&str, Vec<&str>) = match self.screen {
            Screen::ForYou => (
                "No quests available",
                vec![
                    "Press 'r' to refresh and load new quests.",
                    "Check the store URL if this keeps happening.",
                ],
            ),
            Screen::Search => (
                "No quests found",
                vec![
                    "Try adjusting your filters or search query.",
                    "Press 'x' to clear everything.",
                ],
            ),
            Screen::Liked => (
                "No liked quests yet",
                vec![
                    "Start exploring and double-tap on quests you love",
                    "to save them here.",
                ],
            ),
        };

        let mut lines = vec![Line::from(Span::styled(
            heading.to_string(),
            Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
        ))];
        lines.push(Line::default());
        for hint in hints {
            lines.push(Line::from(Span::styled(
                hint.to_string(),
                Style::default().fg(Color::Gray),
            )));
        }
        lines
    }
}
