use catalog_http::html::{document, escape};
use serde_json::Value;

use super::{RenderError, Renderer};

const NAV: &[(&str, &str)] = &[
    ("/catalog/genres", "All genres"),
    ("/catalog/authors", "All authors"),
    ("/catalog/books", "All books"),
    ("/catalog/genre/create", "Create new genre"),
    ("/catalog/author/create", "Create new author"),
];

/// Server-side HTML views for the catalog. Every interpolated value is
/// escaped.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    site_title: String,
}

impl HtmlRenderer {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
        }
    }

    fn layout(&self, title: &str, main: &str) -> String {
        let mut body = String::new();
        body.push_str(&format!(
            "<header><a href=\"/\">{}</a></header>\n",
            escape(&self.site_title)
        ));
        body.push_str("<nav><ul>\n");
        for (href, label) in NAV {
            body.push_str(&format!("<li><a href=\"{href}\">{label}</a></li>\n"));
        }
        body.push_str("</ul></nav>\n");
        body.push_str(&format!("<main>\n<h1>{}</h1>\n{}</main>", escape(title), main));
        document(title, &body)
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, view: &str, data: &Value) -> Result<String, RenderError> {
        let fields = Fields { view, data };
        let title = fields.required("title")?;

        let main = match view {
            "genre_list" => genre_list(&fields),
            "genre_detail" => genre_detail(&fields)?,
            "genre_form" => genre_form(&fields),
            "author_list" => author_list(&fields),
            "author_detail" => author_detail(&fields)?,
            "author_form" => author_form(&fields),
            "book_list" => book_list(&fields),
            other => return Err(RenderError::UnknownView(other.to_string())),
        };

        Ok(self.layout(title, &main))
    }
}

/// Typed lookups into a view payload
struct Fields<'a> {
    view: &'a str,
    data: &'a Value,
}

impl<'a> Fields<'a> {
    fn required(&self, key: &'static str) -> Result<&'a str, RenderError> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing(key))
    }

    fn object(&self, key: &'static str) -> Result<&'a Value, RenderError> {
        self.data
            .get(key)
            .filter(|value| value.is_object())
            .ok_or_else(|| self.missing(key))
    }

    fn list(&self, key: &str) -> &'a [Value] {
        self.data
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn missing(&self, field: &'static str) -> RenderError {
        RenderError::MissingField {
            view: self.view.to_string(),
            field,
        }
    }
}

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn link(value: &Value, label_key: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        escape(text(value, "url")),
        escape(text(value, label_key))
    )
}

fn book_summaries(out: &mut String, books: &[Value], empty: &str) {
    if books.is_empty() {
        out.push_str(&format!("<p>{empty}</p>\n"));
        return;
    }
    out.push_str("<dl>\n");
    for book in books {
        out.push_str(&format!(
            "<dt>{}</dt>\n<dd>{}</dd>\n",
            escape(text(book, "title")),
            escape(text(book, "summary"))
        ));
    }
    out.push_str("</dl>\n");
}

fn errors(out: &mut String, fields: &Fields<'_>) {
    let errors = fields.list("errors");
    if errors.is_empty() {
        return;
    }
    out.push_str("<ul class=\"errors\">\n");
    for error in errors {
        out.push_str(&format!("<li>{}</li>\n", escape(text(error, "message"))));
    }
    out.push_str("</ul>\n");
}

fn genre_list(fields: &Fields<'_>) -> String {
    let genres = fields.list("genre_list");
    if genres.is_empty() {
        return "<p>There are no genres.</p>\n".to_string();
    }
    let mut out = String::from("<ul>\n");
    for genre in genres {
        out.push_str(&format!("<li>{}</li>\n", link(genre, "name")));
    }
    out.push_str("</ul>\n");
    out
}

fn genre_detail(fields: &Fields<'_>) -> Result<String, RenderError> {
    let genre = fields.object("genre")?;
    let mut out = format!("<h2>Genre: {}</h2>\n<h3>Books</h3>\n", escape(text(genre, "name")));
    book_summaries(&mut out, fields.list("genre_books"), "This genre has no books.");
    Ok(out)
}

fn genre_form(fields: &Fields<'_>) -> String {
    let name = fields.data.get("genre").map(|genre| text(genre, "name")).unwrap_or_default();
    let mut out = format!(
        "<form method=\"POST\" action=\"\">\n\
         <label for=\"name\">Genre:</label>\n\
         <input id=\"name\" type=\"text\" name=\"name\" placeholder=\"Fantasy, Poetry etc.\" \
         required value=\"{}\">\n\
         <button type=\"submit\">Submit</button>\n</form>\n",
        escape(name)
    );
    errors(&mut out, fields);
    out
}

fn author_list(fields: &Fields<'_>) -> String {
    let authors = fields.list("author_list");
    if authors.is_empty() {
        return "<p>There are no authors.</p>\n".to_string();
    }
    let mut out = String::from("<ul>\n");
    for author in authors {
        let lifespan = text(author, "lifespan");
        if lifespan.is_empty() {
            out.push_str(&format!("<li>{}</li>\n", link(author, "name")));
        } else {
            out.push_str(&format!(
                "<li>{} ({})</li>\n",
                link(author, "name"),
                escape(lifespan)
            ));
        }
    }
    out.push_str("</ul>\n");
    out
}

fn author_detail(fields: &Fields<'_>) -> Result<String, RenderError> {
    let author = fields.object("author")?;
    let mut out = format!(
        "<h2>Author: {}</h2>\n<p>{}</p>\n<h3>Books</h3>\n",
        escape(text(author, "name")),
        escape(text(author, "lifespan"))
    );
    book_summaries(&mut out, fields.list("author_books"), "This author has no books.");
    Ok(out)
}

fn author_form(fields: &Fields<'_>) -> String {
    let author = fields.data.get("author");
    let value = |key: &str| escape(author.map(|author| text(author, key)).unwrap_or_default());
    let mut out = format!(
        "<form method=\"POST\" action=\"\">\n\
         <label for=\"first_name\">First Name:</label>\n\
         <input id=\"first_name\" type=\"text\" name=\"first_name\" required value=\"{}\">\n\
         <label for=\"family_name\">Family Name:</label>\n\
         <input id=\"family_name\" type=\"text\" name=\"family_name\" required value=\"{}\">\n\
         <label for=\"date_of_birth\">Date of birth:</label>\n\
         <input id=\"date_of_birth\" type=\"date\" name=\"date_of_birth\" value=\"{}\">\n\
         <label for=\"date_of_death\">Date of death:</label>\n\
         <input id=\"date_of_death\" type=\"date\" name=\"date_of_death\" value=\"{}\">\n\
         <button type=\"submit\">Submit</button>\n</form>\n",
        value("first_name"),
        value("family_name"),
        value("date_of_birth"),
        value("date_of_death"),
    );
    errors(&mut out, fields);
    out
}

fn book_list(fields: &Fields<'_>) -> String {
    let books = fields.list("book_list");
    if books.is_empty() {
        return "<p>There are no books.</p>\n".to_string();
    }
    let mut out = String::from("<ul>\n");
    for book in books {
        let author = book.get("author").unwrap_or(&Value::Null);
        out.push_str(&format!(
            "<li>{} ({})</li>\n",
            escape(text(book, "title")),
            link(author, "name")
        ));
    }
    out.push_str("</ul>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new("Local Library")
    }

    #[test]
    fn genre_list_links_each_genre() {
        let html = renderer()
            .render(
                "genre_list",
                &json!({
                    "title": "Genre List",
                    "genre_list": [
                        {"name": "Fantasy", "url": "/catalog/genre/1"},
                        {"name": "Poetry", "url": "/catalog/genre/2"},
                    ]
                }),
            )
            .unwrap();

        assert!(html.contains("<title>Genre List</title>"));
        assert!(html.contains("<a href=\"&#x2F;catalog&#x2F;genre&#x2F;1\">Fantasy</a>"));
        assert!(html.contains(">Poetry</a>"));
    }

    #[test]
    fn empty_lists_say_so() {
        let html = renderer()
            .render("genre_list", &json!({"title": "Genre List", "genre_list": []}))
            .unwrap();
        assert!(html.contains("There are no genres."));
    }

    #[test]
    fn form_preserves_attempt_and_lists_errors() {
        let html = renderer()
            .render(
                "genre_form",
                &json!({
                    "title": "Create Genre",
                    "genre": {"name": "ab"},
                    "errors": [{"field": "name", "message": "Genre name must contain at least 3 characters"}]
                }),
            )
            .unwrap();

        assert!(html.contains("value=\"ab\""));
        assert!(html.contains("<li>Genre name must contain at least 3 characters</li>"));
    }

    #[test]
    fn payload_values_are_escaped() {
        let html = renderer()
            .render(
                "genre_detail",
                &json!({
                    "title": "Genre Detail",
                    "genre": {"name": "<i>x</i>"},
                    "genre_books": [{"title": "T & U", "summary": "\"quoted\""}]
                }),
            )
            .unwrap();

        assert!(html.contains("Genre: &lt;i&gt;x&lt;&#x2F;i&gt;"));
        assert!(html.contains("<dt>T &amp; U</dt>"));
        assert!(html.contains("<dd>&quot;quoted&quot;</dd>"));
    }

    #[test]
    fn unknown_view_and_missing_fields_are_errors() {
        let err = renderer()
            .render("genre_delete", &json!({"title": "x"}))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownView(ref view) if view == "genre_delete"));

        let err = renderer()
            .render("genre_detail", &json!({"title": "Genre Detail"}))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingField { field: "genre", .. }));

        let err = renderer().render("genre_list", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::MissingField { field: "title", .. }));
    }

    #[test]
    fn author_list_shows_lifespan_when_known() {
        let html = renderer()
            .render(
                "author_list",
                &json!({
                    "title": "Author List",
                    "author_list": [
                        {"name": "Austen, Jane", "url": "/a/1", "lifespan": "Dec 16, 1775 - Jul 18, 1817"},
                        {"name": "Rothfuss, Patrick", "url": "/a/2", "lifespan": ""},
                    ]
                }),
            )
            .unwrap();

        assert!(html.contains(">Austen, Jane</a> (Dec 16, 1775 - Jul 18, 1817)</li>"));
        assert!(html.contains(">Rothfuss, Patrick</a></li>"));
    }

    #[test]
    fn layout_puts_each_fragment_on_its_own_line() {
        let html = renderer()
            .render(
                "genre_detail",
                &json!({
                    "title": "Genre Detail",
                    "genre": {"name": "Poetry"},
                    "genre_books": [
                        {"title": "Odes", "summary": "Short"},
                        {"title": "Sonnets", "summary": "Longer"},
                    ]
                }),
            )
            .unwrap();

        assert!(html.contains("</a></header>\n<nav><ul>\n"));
        assert!(html.contains(
            "<li><a href=\"/catalog/genres\">All genres</a></li>\n\
             <li><a href=\"/catalog/authors\">All authors</a></li>\n"
        ));
        assert!(html.contains("</ul></nav>\n<main>\n<h1>Genre Detail</h1>\n"));
        assert!(html.contains("<dt>Odes</dt>\n<dd>Short</dd>\n<dt>Sonnets</dt>\n<dd>Longer</dd>\n</dl>\n</main>"));
    }
}
