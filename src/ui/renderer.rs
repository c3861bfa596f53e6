//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Text Rendering**: Turn the view model into ANSI-styled lines
//!
//! Rendering produces a `String` so output can be inspected in tests; [`render`]
//! prints it.

use crate::app::{AppState, Notification, NotificationLevel};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AnalyticsView, Body, CatalogView, DetailView, DisplayItem, FooterInfo, FormView, HeaderInfo,
    UIViewModel,
};
use std::fmt::Write as _;

/// Renders the current state to stdout.
pub fn render(state: &AppState, cols: usize) {
    let viewmodel = state.compute_viewmodel();
    print!("{}", render_to_string(&viewmodel, &state.theme, cols));
}

/// Renders a view model into ANSI-styled text, one line per row.
#[must_use]
pub fn render_to_string(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    render_header(&mut out, &vm.header, theme, cols);
    match &vm.body {
        Body::Catalog(view) => render_catalog(&mut out, view, theme),
        Body::MovieDetails(view) => render_detail(&mut out, view, theme),
        Body::Analytics(view) => render_analytics(&mut out, view, theme),
        Body::Form(view) => render_form(&mut out, view, theme),
        Body::AccessDenied { message } => {
            line(&mut out, &paint(&theme.colors.error_fg, message));
        }
        Body::Static { title, text } => {
            line(&mut out, &bold(&theme.colors.header_fg, title));
            line(&mut out, &paint(&theme.colors.text_normal, text));
        }
        Body::NotFound { path } => {
            line(&mut out, &bold(&theme.colors.header_fg, "404"));
            line(&mut out, &paint(&theme.colors.text_dim, &format!("Nothing lives at {path}")));
        }
    }
    render_footer(&mut out, &vm.footer, theme, cols);

    out
}

/// One notification line, colored by level.
#[must_use]
pub fn render_notification(notification: &Notification, theme: &Theme) -> String {
    let (color, prefix) = match notification.level {
        NotificationLevel::Success => (&theme.colors.success_fg, "✓ "),
        NotificationLevel::Info => (&theme.colors.text_normal, ""),
        NotificationLevel::Error => (&theme.colors.error_fg, "✗ "),
    };
    format!("{}\n", paint(color, &format!("{prefix}{}", notification.message)))
}

fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let mut right = Vec::new();
    if header.show_stats {
        right.push("Stats".to_string());
    }
    right.push(header.user_label.clone().unwrap_or_else(|| "Login".to_string()));
    let right = right.join("  ");

    let used = header.title.chars().count() + right.chars().count();
    let padding = cols.saturating_sub(used).max(2);

    line(
        out,
        &format!(
            "{}{}{}",
            bold(&theme.colors.accent, &header.title),
            " ".repeat(padding),
            paint(&theme.colors.text_normal, &right)
        ),
    );
    separator(out, theme, cols);
}

fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    separator(out, theme, cols);
    line(out, &paint(&theme.colors.text_dim, &footer.keybindings));
}

fn render_catalog(out: &mut String, view: &CatalogView, theme: &Theme) {
    line(
        out,
        &format!(
            "{} {}",
            paint(&theme.colors.text_dim, "Search:"),
            paint(&theme.colors.text_normal, &view.search_bar.query)
        ),
    );

    if !view.genre_bar.is_empty() {
        let chips: Vec<String> = view
            .genre_bar
            .iter()
            .map(|chip| {
                if chip.selected {
                    bold(&theme.colors.accent, &format!("[{}]", chip.label))
                } else {
                    paint(&theme.colors.text_dim, &chip.label)
                }
            })
            .collect();
        line(out, &format!("{} {}", paint(&theme.colors.text_dim, "Genres:"), chips.join(" ")));
    }

    let buttons: Vec<String> = view
        .sort_bar
        .iter()
        .map(|button| match button.arrow {
            Some(arrow) if button.active => bold(&theme.colors.accent, &format!("{}{arrow}", button.label)),
            _ => paint(&theme.colors.text_dim, &button.label),
        })
        .collect();
    line(out, &format!("{} {}", paint(&theme.colors.text_dim, "Sort:"), buttons.join(" ")));

    if let Some(error) = &view.error {
        line(out, &paint(&theme.colors.error_fg, error));
    }
    if view.loading {
        line(out, &paint(&theme.colors.text_dim, "Loading..."));
    }

    if let Some(empty) = &view.empty_state {
        line(out, &bold(&theme.colors.header_fg, &empty.message));
        line(out, &paint(&theme.colors.text_dim, &empty.subtitle));
        return;
    }

    for item in &view.items {
        render_item(out, item, theme);
    }
    line(
        out,
        &paint(
            &theme.colors.text_dim,
            &format!("{} of {} movies", view.items.len(), view.total),
        ),
    );
}

fn render_item(out: &mut String, item: &DisplayItem, theme: &Theme) {
    let title = highlight(&item.title, &item.highlight_ranges, theme);
    let mut meta = Vec::new();
    if !item.year.is_empty() {
        meta.push(item.year.clone());
    }
    if !item.genres.is_empty() {
        meta.push(item.genres.clone());
    }
    if !item.rating.is_empty() {
        meta.push(item.rating.clone());
    }

    line(
        out,
        &format!(
            "{} {}  {}",
            paint(&theme.colors.text_dim, &format!("{:>3}.", item.index)),
            title,
            paint(&theme.colors.text_dim, &meta.join(" · "))
        ),
    );
}

/// Paints `ranges` (character indices) of `text` in the highlight color.
fn highlight(text: &str, ranges: &[(usize, usize)], theme: &Theme) -> String {
    if ranges.is_empty() {
        return paint(&theme.colors.text_normal, text);
    }

    let mut out = String::new();
    let mut in_range = false;
    for (i, c) in text.chars().enumerate() {
        let hit = ranges.iter().any(|(start, end)| i >= *start && i < *end);
        if hit != in_range || i == 0 {
            out.push_str(Theme::reset());
            if hit {
                out.push_str(Theme::bold());
                out.push_str(&Theme::fg(&theme.colors.highlight_fg));
            } else {
                out.push_str(&Theme::fg(&theme.colors.text_normal));
            }
            in_range = hit;
        }
        out.push(c);
    }
    out.push_str(Theme::reset());
    out
}

fn render_detail(out: &mut String, view: &DetailView, theme: &Theme) {
    if view.loading {
        line(out, &paint(&theme.colors.text_dim, "Loading movie details..."));
        return;
    }
    if let Some(error) = &view.error {
        line(out, &paint(&theme.colors.error_fg, &format!("Error: {error}")));
        return;
    }
    if view.title.is_empty() {
        line(out, &paint(&theme.colors.text_dim, "Movie not found."));
        return;
    }

    line(out, &bold(&theme.colors.header_fg, &view.title));
    for (label, value) in &view.fields {
        line(
            out,
            &format!(
                "{} {}",
                paint(&theme.colors.text_dim, &format!("{label:>10}:")),
                paint(&theme.colors.text_normal, value)
            ),
        );
    }
    if let Some(plot) = &view.plot {
        line(out, "");
        line(out, &paint(&theme.colors.text_normal, plot));
    }
}

fn render_analytics(out: &mut String, view: &AnalyticsView, theme: &Theme) {
    line(out, &bold(&theme.colors.header_fg, "Analytics"));
    if view.loading {
        line(out, &paint(&theme.colors.text_dim, "Loading dashboard..."));
        return;
    }
    if let Some(error) = &view.error {
        line(out, &paint(&theme.colors.error_fg, &format!("Error: {error}")));
        return;
    }

    let mut overview = format!("Movies: {}", view.total_movies);
    if let Some(users) = view.total_users {
        let _ = write!(overview, "  Users: {users}");
    }
    if let Some(rating) = view.avg_rating {
        let _ = write!(overview, "  Avg rating: {rating:.1}");
    }
    line(out, &paint(&theme.colors.text_normal, &overview));

    if !view.genre_shares.is_empty() {
        line(out, &paint(&theme.colors.text_dim, "Genres"));
        for (genre, percentage) in &view.genre_shares {
            let bar = "█".repeat(usize::try_from(*percentage / 2).unwrap_or(0));
            line(
                out,
                &format!(
                    "  {:<14} {:>3}% {}",
                    genre,
                    percentage,
                    paint(&theme.colors.accent, &bar)
                ),
            );
        }
    }

    if !view.yearly.is_empty() {
        line(out, &paint(&theme.colors.text_dim, "Average runtime by year"));
        for (year, runtime) in &view.yearly {
            let runtime = runtime.map_or_else(|| "-".to_string(), |r| format!("{r:.0} min"));
            line(out, &format!("  {year:<6} {runtime}"));
        }
    }
}

fn render_form(out: &mut String, view: &FormView, theme: &Theme) {
    line(out, &bold(&theme.colors.header_fg, &view.title));
    line(out, &paint(&theme.colors.text_dim, &view.usage));
    if view.submitting {
        line(out, &paint(&theme.colors.text_dim, "Submitting..."));
    }
    if let Some(error) = &view.error {
        line(out, &paint(&theme.colors.error_fg, error));
    }
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{text}{}", Theme::fg(color), Theme::reset())
}

fn bold(color: &str, text: &str) -> String {
    format!("{}{}{text}{}", Theme::bold(), Theme::fg(color), Theme::reset())
}

fn separator(out: &mut String, theme: &Theme, cols: usize) {
    line(out, &paint(&theme.colors.border, &"─".repeat(cols.max(1))));
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}
