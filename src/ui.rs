pub mod hud;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use padwork::cue::CueKind;
use padwork::observer::Feedback;
use padwork::session::{EndCause, RoundSummary};
use padwork::util::{countdown_secs, format_offset_ms};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn feedback_style(feedback: Feedback) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match feedback {
        Feedback::Perfect => bold.fg(Color::Green),
        Feedback::Good => bold.fg(Color::Yellow),
        Feedback::Late => bold.fg(Color::Rgb(255, 165, 0)),
        Feedback::Miss | Feedback::WrongKey | Feedback::GameOver => bold.fg(Color::Red),
        Feedback::SpeedUp => bold.fg(Color::Cyan),
    }
}

/// Full hearts then empty ones; falls back to a count when it will not fit.
fn hearts_line(health: u32, max_health: u32, width: u16) -> String {
    let full = health.min(max_health) as usize;
    let empty = max_health as usize - full;
    let hearts = std::iter::repeat("♥")
        .take(full)
        .chain(std::iter::repeat("♡").take(empty))
        .collect::<Vec<_>>()
        .join(" ");
    if hearts.width() <= width as usize {
        hearts
    } else {
        format!("♥ {health}/{max_health}")
    }
}

fn clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn legend() -> String {
    CueKind::ALL
        .iter()
        .map(|kind| format!("{} {}", kind.key_label(), kind.to_string().to_lowercase()))
        .collect::<Vec<_>>()
        .join("  ")
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.engine.observer().summary {
            Some(summary) if !self.is_playing() => render_summary(summary, area, buf),
            _ => render_round(self, area, buf),
        }
    }
}

fn render_round(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let state = app.engine.state();
    let hud = app.engine.observer();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let status = Line::from(vec![
        Span::styled(format!("score {}", state.score), bold_style),
        Span::raw("   "),
        Span::styled(format!("streak {}", state.streak), bold_style),
        Span::raw("   "),
        Span::styled(format!("x{:.2}", state.speed_multiplier), dim_bold_style),
        Span::raw("   "),
        Span::styled(clock(countdown_secs(state.time_remaining)), bold_style),
    ]);
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        hearts_line(hud.health, state.max_health, chunks[1].width),
        Style::default().fg(Color::Red),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    match &hud.cue {
        Some((kind, key_label)) => {
            let prompt = vec![
                Line::from(Span::styled(
                    kind.to_string().to_uppercase(),
                    Style::default()
                        .patch(bold_style)
                        .fg(Color::Magenta),
                )),
                Line::from(Span::styled(format!("[ {key_label} ]"), dim_bold_style)),
            ];
            Paragraph::new(prompt)
                .alignment(Alignment::Center)
                .render(chunks[3], buf);

            if let Some(cue) = app.engine.pending_cue() {
                let ratio = ((app.engine.now() - cue.issued_at) / cue.display_duration)
                    .clamp(0.0, 1.0);
                Gauge::default()
                    .gauge_style(Style::default().fg(Color::Magenta))
                    .ratio(1.0 - ratio)
                    .label("")
                    .render(chunks[4], buf);
            }
        }
        None if state.active => {
            Paragraph::new(Span::styled("...", dim_bold_style))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }
        None => {
            Paragraph::new(Span::styled("press (r) to start a round", italic_style))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }
    }

    if let Some(feedback) = hud.feedback {
        Paragraph::new(Span::styled(feedback.to_string(), feedback_style(feedback)))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }

    Paragraph::new(Span::styled(
        format!("{}  (esc)ape", legend()),
        italic_style,
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[7], buf);
}

fn render_summary(summary: &RoundSummary, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let title_style = match summary.cause {
        EndCause::TimeUp => green_bold_style,
        EndCause::Defeated => red_bold_style,
    };

    let tally = &summary.tally;
    let accuracy = match (summary.mean_offset, summary.offset_std_dev) {
        (Some(mean), Some(sd)) => format!(
            "mean offset {}  spread {}",
            format_offset_ms(mean),
            format_offset_ms(sd).trim_start_matches('+')
        ),
        _ => "no hits landed".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(summary.cause.to_string(), title_style)),
        Line::from(""),
        Line::from(Span::styled(format!("{} pts", summary.final_score), bold_style)),
        Line::from(Span::styled(
            format!(
                "best streak {}   survived {:.1}s   top speed x{:.2}",
                summary.max_streak, summary.seconds_survived, summary.top_speed
            ),
            dim_bold_style,
        )),
        Line::from(Span::styled(
            format!(
                "perfect {}  good {}  late {}  missed {}  wrong key {}",
                tally.perfect, tally.good, tally.late, tally.missed, tally.wrong_key
            ),
            dim_bold_style,
        )),
        Line::from(Span::styled(accuracy, dim_bold_style)),
        Line::from(""),
        Line::from(Span::styled("(r)estart / (esc)ape", italic_style)),
    ];

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::hud::Hud;
    use padwork::config::Config;
    use padwork::controller::SessionController;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_app() -> App {
        let engine = SessionController::new(Config::default(), Hud::new(), StdRng::seed_from_u64(7));
        App::from_controller(engine)
    }

    fn rendered(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_round_shows_status_and_hearts() {
        let mut app = create_test_app();
        app.restart();
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("score 0"));
        assert!(text.contains("streak 0"));
        assert!(text.contains("1:30"));
        assert!(text.contains("♥"));
        assert!(text.contains("(esc)ape"));
    }

    #[test]
    fn test_round_shows_the_cue_prompt() {
        let mut app = create_test_app();
        app.restart();
        app.advance(0.35);
        let (kind, label) = app.engine.observer().cue.clone().unwrap();
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains(&kind.to_string().to_uppercase()));
        assert!(text.contains(&format!("[ {label} ]")));
    }

    #[test]
    fn test_summary_after_time_up() {
        let mut config = Config::default();
        config.round_duration = 1.0;
        config.first_cue_delay = 5.0;
        let engine = SessionController::new(config, Hud::new(), StdRng::seed_from_u64(7));
        let mut app = App::from_controller(engine);
        app.restart();
        app.advance(1.5);
        assert!(!app.is_playing());

        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("Time up"));
        assert!(text.contains("0 pts"));
        assert!(text.contains("no hits landed"));
        assert!(text.contains("(r)estart"));
    }

    #[test]
    fn test_idle_before_first_round() {
        let app = create_test_app();
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("press (r) to start a round"));
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let mut app = create_test_app();
        app.restart();
        app.advance(0.35);
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_hearts_line() {
        assert_eq!(hearts_line(3, 5, 80), "♥ ♥ ♥ ♡ ♡");
        assert_eq!(hearts_line(0, 2, 80), "♡ ♡");
        assert_eq!(hearts_line(3, 5, 4), "♥ 3/5");
    }

    #[test]
    fn test_clock() {
        assert_eq!(clock(90), "1:30");
        assert_eq!(clock(5), "0:05");
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 2);
    }
}
