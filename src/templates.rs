//! Server-side page renderers.
//!
//! Each page is a small HTML document built from translation keys. Every
//! translated string is escaped before it reaches the markup.

use crate::i18n::LocaleContext;

/// Pages served by the site, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Problems,
    Contests,
    Submissions,
    Organizations,
    Classes,
    Groups,
    Ranking,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Home,
        Page::Problems,
        Page::Contests,
        Page::Submissions,
        Page::Organizations,
        Page::Classes,
        Page::Groups,
        Page::Ranking,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Problems => "/problems",
            Page::Contests => "/contests",
            Page::Submissions => "/submissions",
            Page::Organizations => "/organizations",
            Page::Classes => "/organizations/classes",
            Page::Groups => "/organizations/groups",
            Page::Ranking => "/ranking",
        }
    }

    /// Translation key prefix, e.g. `page.problems`.
    fn key(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Problems => "problems",
            Page::Contests => "contests",
            Page::Submissions => "submissions",
            Page::Organizations => "organizations",
            Page::Classes => "classes",
            Page::Groups => "groups",
            Page::Ranking => "ranking",
        }
    }

    fn in_top_nav(self) -> bool {
        !matches!(self, Page::Classes | Page::Groups)
    }
}

/// Render `page` in the request's language.
pub fn render(page: Page, ctx: &LocaleContext) -> String {
    let key = page.key();
    let title = ctx.t(&format!("page.{}.title", key)).to_string();
    let body = ctx.t(&format!("page.{}.body", key)).to_string();

    let mut html = String::with_capacity(2048);
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · {site}</title>\n\
         <script src=\"/public/theme.js\" defer></script>\n\
         </head>\n<body>\n",
        lang = escape_html(ctx.locale.as_str()),
        title = escape_html(&title),
        site = escape_html(ctx.t("site.name")),
    ));

    html.push_str(&navigation(page, ctx));

    html.push_str(&format!(
        "<main>\n<h1 data-i18n=\"page.{key}.title\">{title}</h1>\n\
         <p data-i18n=\"page.{key}.body\">{body}</p>\n</main>\n",
        key = key,
        title = escape_html(&title),
        body = escape_html(&body),
    ));

    html.push_str("<script src=\"/public/i18n.js\" defer></script>\n</body>\n</html>\n");
    html
}

fn navigation(current: Page, ctx: &LocaleContext) -> String {
    let mut nav = String::from("<nav>\n<ul>\n");

    for page in Page::ALL.into_iter().filter(|p| p.in_top_nav()) {
        let key = format!("nav.{}", page.key());
        let aria = if page == current {
            " aria-current=\"page\""
        } else {
            ""
        };
        nav.push_str(&format!(
            "<li><a href=\"{}\"{} data-i18n=\"{}\">{}</a></li>\n",
            page.path(),
            aria,
            key,
            escape_html(ctx.t(&key)),
        ));
    }
    nav.push_str("</ul>\n");

    nav.push_str(&format!(
        "<label><span data-i18n=\"language.label\">{}</span>\n<select data-lang-select>\n",
        escape_html(ctx.t("language.label")),
    ));
    for locale in ctx.locales.iter() {
        let name_key = format!("language.name.{}", locale);
        let name = ctx.translator.get(&name_key).unwrap_or(locale.as_str());
        let selected = if *locale == ctx.locale { " selected" } else { "" };
        nav.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(locale.as_str()),
            selected,
            escape_html(name),
        ));
    }
    nav.push_str("</select>\n</label>\n");

    nav.push_str(&format!(
        "<button type=\"button\" id=\"theme-toggle\" data-i18n=\"theme.toggle\">{}</button>\n",
        escape_html(ctx.t("theme.toggle")),
    ));
    nav.push_str("</nav>\n");
    nav
}

/// Replace `&`, `<`, `>`, `"` and `'` with their HTML entities.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
