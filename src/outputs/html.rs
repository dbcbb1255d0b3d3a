//! HTML rendering of a [`PageView`].
//!
//! Every string that came from a provider goes through [`escape_html`].

use crate::page::PageView;
use crate::panels::PanelView;
use crate::panels::day::DayInfo;
use crate::panels::news::{Headlines, NO_DATA, NewsView, title_for_key};
use crate::panels::photos::PhotoGrid;
use crate::utils::escape_html;
use std::error::Error;
use std::fmt::Write;
use tokio::fs;
use tracing::{info, instrument};

pub const LOADING: &str = "Loading...";

/// Render the whole page as a standalone HTML document.
pub fn render_page(page: &PageView) -> String {
    let mut columns = String::new();
    for column in &page.news_columns {
        columns.push_str(r#"<div class="column">"#);
        for panel in column {
            columns.push_str(r#"<div class="cell">"#);
            columns.push_str(&render_news(panel));
            columns.push_str("</div>");
        }
        columns.push_str("</div>");
    }

    let content = format!(
        r#"<header class="head">
{sweden}
<div class="banner"><h1>{banner}</h1></div>
{japan}
</header>
<main class="columns">
{columns}
<div class="column photos">{photos}</div>
</main>"#,
        sweden = render_day(&page.sweden),
        banner = escape_html(page.banner),
        japan = render_day(&page.japan),
        photos = render_photos(&page.photos),
    );

    build_page(page.banner, &page.generated_at, &content)
}

fn placeholder<T>(view: &PanelView<T>) -> Option<String> {
    match view {
        PanelView::Loading => Some(format!("<div>{LOADING}</div>")),
        PanelView::Error { message } => Some(format!("<div>Error: {}</div>", escape_html(message))),
        PanelView::NoData => Some(format!("<div>{NO_DATA}</div>")),
        PanelView::Ready(_) => None,
    }
}

pub fn render_day(view: &PanelView<DayInfo>) -> String {
    let PanelView::Ready(info) = view else {
        return placeholder(view).unwrap_or_default();
    };

    let icon = info
        .weather
        .icon_url
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" class="weather-icon">"#,
                escape_html(src),
                escape_html(&info.weather.label)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="day-info {locale}">
<ul>
<li class="flag">{flag}</li>
<li>{date}</li>
<li>{time} {time_icon}</li>
<li class="weather">{weather}{icon}</li>
<li lang="{lang}">{trivia}</li>
</ul>
</div>"#,
        locale = info.locale,
        flag = info.flag,
        date = escape_html(&info.clock.date),
        time = escape_html(&info.clock.time),
        time_icon = info.clock.icon,
        weather = escape_html(&info.weather.label),
        lang = info.language_tag,
        trivia = escape_html(&info.trivia),
    )
}

pub fn render_news(panel: &NewsView) -> String {
    let PanelView::Ready(headlines) = &panel.view else {
        return match panel.view {
            PanelView::NoData => placeholder(&panel.view).unwrap_or_default(),
            _ => format!(
                r#"<div class="news-info"><h2>{} Top News</h2>{}</div>"#,
                escape_html(title_for_key(&panel.key)),
                placeholder(&panel.view).unwrap_or_default()
            ),
        };
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="news-info {}"><h2>{} Top News</h2>"#,
        escape_html(&panel.key),
        escape_html(headlines.title)
    );
    html.push_str(&render_featured(headlines));
    html.push_str("<ul>");
    for article in &headlines.articles {
        let _ = write!(
            html,
            r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">&#9654; {}</a></li>"#,
            escape_html(&article.url),
            escape_html(&article.title)
        );
    }
    html.push_str("</ul></div>");
    html
}

fn render_featured(headlines: &Headlines) -> String {
    let Some(article) = &headlines.featured else {
        return String::new();
    };
    let image = article.image().unwrap_or_default();
    format!(
        r#"<div class="featured">
<a href="{url}" target="_blank" rel="noopener noreferrer"><img src="{image}" alt="{title}"></a>
<a href="{url}" target="_blank" rel="noopener noreferrer"><h3>{title}</h3></a>
<p>{description}</p>
</div>"#,
        url = escape_html(&article.url),
        image = escape_html(image),
        title = escape_html(&article.title),
        description = escape_html(article.description.as_deref().unwrap_or("")),
    )
}

pub fn render_photos(view: &PanelView<PhotoGrid>) -> String {
    let PanelView::Ready(grid) = view else {
        return placeholder(view).unwrap_or_default();
    };

    let mut tiles = String::new();
    for tile in &grid.tiles {
        let _ = write!(
            tiles,
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="tile"><img src="{}" alt="{}"><p>{}</p></a>"#,
            escape_html(&tile.permalink),
            escape_html(&tile.image_url),
            escape_html(&tile.alt),
            escape_html(&tile.caption)
        );
    }
    format!(
        r#"<div><h2>{}</h2><div class="grid">{}</div></div>"#,
        escape_html(&grid.heading),
        tiles
    )
}

fn build_page(title: &str, generated_at: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="generated-at" content="{generated_at}">
<title>{title}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:#f3f4f6;padding-top:20px;}}
.day-info ul{{display:flex;align-items:center;list-style:none;padding:12px 32px 0;}}
.day-info li{{padding:0 32px;text-align:center;}}
.day-info .flag{{font-size:30px;padding-left:0;}}
.weather{{display:flex;align-items:center;}}
.weather-icon{{width:32px;height:32px;object-fit:cover;}}
.banner{{background:linear-gradient(to right,#4f46e5,#ec4899);height:80px;display:flex;align-items:center;justify-content:center;}}
.banner h1{{color:#fff;font-size:36px;font-weight:700;}}
.columns{{display:flex;padding:0 20px;}}
.column{{width:40%;margin-top:20px;border-right:1px dashed #6b7280;}}
.column.photos{{width:20%;border-right:none;padding:20px;}}
.cell{{margin:20px;padding-bottom:40px;}}
.cell+.cell{{border-top:1px dashed #6b7280;padding-top:20px;}}
h2{{font-size:24px;font-weight:700;padding-bottom:20px;text-decoration:underline #ec4899 3px;}}
.news-info li{{margin-bottom:8px;white-space:nowrap;overflow:hidden;text-overflow:ellipsis;}}
.news-info a{{color:inherit;font-weight:700;text-decoration:none;}}
.featured{{margin-bottom:20px;}}
.featured img{{width:240px;aspect-ratio:16/9;object-fit:cover;}}
.featured p{{color:#4b5563;margin-top:4px;}}
.grid{{display:grid;grid-template-columns:1fr 1fr;gap:16px;}}
.tile{{position:relative;display:block;}}
.tile img{{width:100%;height:256px;object-fit:cover;}}
.tile p{{position:absolute;bottom:0;left:0;width:100%;background:rgba(0,0,0,.6);color:#fff;font-size:14px;padding:8px;text-align:center;opacity:0;}}
.tile:hover p{{opacity:1;}}
.tile:hover img{{opacity:.6;}}
</style>
</head>
<body>
{content}
</body>
</html>"#,
        generated_at = escape_html(generated_at),
        title = escape_html(title),
    )
}

/// Write the rendered page to `{output_dir}/index.html`.
#[instrument(level = "info", skip_all, fields(%output_dir))]
pub async fn write_page(page: &PageView, output_dir: &str) -> Result<String, Box<dyn Error>> {
    let path = format!("{}/index.html", output_dir.trim_end_matches('/'));
    fs::write(&path, render_page(page)).await?;
    info!(%path, "Wrote dashboard HTML");
    Ok(path)
}
