//! Markup builders for the shell's own surfaces.
//!
//! Only the structural markup the managers mount is built here; the
//! markdown body arrives pre-rendered from the markdown collaborator and
//! is embedded as-is.

use vitrine_content::{Category, Frontmatter, FrontmatterValue, ProjectSummary};

/// Escapes text for embedding in HTML.
pub fn escape_html(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

fn scalar<'a>(meta: &'a Frontmatter, key: &str) -> Option<&'a str> {
	meta.get(key).and_then(FrontmatterValue::as_scalar)
}

fn tags_of(meta: &Frontmatter) -> &[String] {
	meta.get("tags")
		.and_then(FrontmatterValue::as_list)
		.unwrap_or(&[])
}

/// The detail route a card links to.
fn card_href(project: &ProjectSummary) -> String {
	if project.category == "fun" {
		format!("/fun/{}", project.id)
	} else {
		format!("/projects/{}", project.id)
	}
}

/// Builds the full project detail page.
pub fn project_detail(
	id: &str,
	category: Category,
	meta: &Frontmatter,
	read_minutes: u32,
	body_html: &str,
) -> String {
	let title = scalar(meta, "title").unwrap_or(id);
	let mut html = String::new();

	html.push_str(&format!(
		"<article class=\"project-page\" data-project-id=\"{}\" data-category=\"{}\">",
		escape_html(id),
		category.as_str(),
	));

	html.push_str("<header class=\"project-hero\">");
	if let Some(thumbnail) = scalar(meta, "thumbnail") {
		html.push_str(&format!(
			"<img class=\"project-hero-image\" src=\"{}\" alt=\"\">",
			escape_html(thumbnail)
		));
	}
	html.push_str(&format!("<h1>{}</h1>", escape_html(title)));
	html.push_str("</header>");

	html.push_str("<ul class=\"project-meta\">");
	for (key, label) in [("year", "Year"), ("client", "Client"), ("role", "Role")] {
		if let Some(value) = scalar(meta, key) {
			html.push_str(&format!(
				"<li><span class=\"meta-label\">{}</span>{}</li>",
				label,
				escape_html(value)
			));
		}
	}
	html.push_str(&format!(
		"<li class=\"read-time\">{} min read</li>",
		read_minutes
	));
	html.push_str("</ul>");

	let tags = tags_of(meta);
	if !tags.is_empty() {
		html.push_str("<ul class=\"project-tags\">");
		for tag in tags {
			html.push_str(&format!("<li class=\"tag\">{}</li>", escape_html(tag)));
		}
		html.push_str("</ul>");
	}

	html.push_str(&format!("<div class=\"project-body\">{}</div>", body_html));

	html.push_str(&format!(
		"<a class=\"project-back\" href=\"/\" data-return-category=\"{}\">Back to projects</a>",
		category.as_str(),
	));

	html.push_str("</article>");
	html
}

/// Builds one project card.
pub fn project_card(project: &ProjectSummary) -> String {
	let mut html = String::new();
	html.push_str(&format!(
		"<a class=\"project-card\" href=\"{}\" data-project-id=\"{}\">",
		card_href(project),
		escape_html(&project.id),
	));
	if !project.thumbnail.is_empty() {
		html.push_str(&format!(
			"<img class=\"card-thumbnail\" src=\"{}\" alt=\"\">",
			escape_html(&project.thumbnail)
		));
	}
	html.push_str(&format!("<h2>{}</h2>", escape_html(&project.title)));
	if !project.description.is_empty() {
		html.push_str(&format!("<p>{}</p>", escape_html(&project.description)));
	}
	// Chip placeholders; the chip collaborator fills these in
	html.push_str(&format!(
		"<div class=\"card-chips\" data-tags=\"{}\"></div>",
		escape_html(&project.tags.join(","))
	));
	html.push_str("</a>");
	html
}

/// Builds the project grid for a list page.
pub fn project_grid(projects: &[ProjectSummary]) -> String {
	if projects.is_empty() {
		return "<section class=\"project-grid\"><p class=\"project-grid-empty\">Nothing here yet.</p></section>"
			.to_string();
	}

	let mut html = String::from("<section class=\"project-grid\">");
	for project in projects {
		html.push_str(&project_card(project));
	}
	html.push_str("</section>");
	html
}

/// Builds the modal variant of the project list.
pub fn modal_projects(category: &str, projects: &[ProjectSummary]) -> String {
	format!(
		"<div class=\"projects-window\" data-category=\"{}\">{}</div>",
		escape_html(category),
		project_grid(projects),
	)
}

/// Builds the generic error page with its single back-to-desktop action.
pub fn error_page(message: &str) -> String {
	format!(
		"<section class=\"error-page\"><h1>Something went wrong</h1><p>{}</p><a class=\"error-back\" href=\"/\">Back to the desktop</a></section>",
		escape_html(message),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use vitrine_content::frontmatter;

	fn summary(id: &str, category: &str) -> ProjectSummary {
		ProjectSummary {
			id: id.to_string(),
			category: category.to_string(),
			title: id.to_uppercase(),
			thumbnail: String::new(),
			description: String::new(),
			tags: vec!["rust".to_string()],
			year: None,
			client: None,
			role: None,
		}
	}

	#[test]
	fn test_escape_html() {
		assert_eq!(
			escape_html(r#"<b>"a" & 'b'</b>"#),
			"&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
		);
	}

	#[test]
	fn test_card_href_by_category() {
		assert!(project_card(&summary("atlas", "work")).contains("href=\"/projects/atlas\""));
		assert!(project_card(&summary("pixels", "fun")).contains("href=\"/fun/pixels\""));
	}

	#[test]
	fn test_grid_empty_state() {
		assert!(project_grid(&[]).contains("project-grid-empty"));
	}

	#[test]
	fn test_detail_title_falls_back_to_id() {
		let (meta, _) = frontmatter::split("no frontmatter");
		let html = project_detail("atlas", Category::Work, &meta, 3, "<p>body</p>");
		assert!(html.contains("<h1>atlas</h1>"));
		assert!(html.contains("3 min read"));
		assert!(html.contains("<p>body</p>"));
	}

	#[test]
	fn test_detail_renders_metadata_rows() {
		let (meta, _) = frontmatter::split(
			"---\ntitle: Atlas\nyear: 2024\nclient: Acme\ntags: [maps]\n---\nbody",
		);
		let html = project_detail("atlas", Category::Work, &meta, 1, "");
		assert!(html.contains("<h1>Atlas</h1>"));
		assert!(html.contains("2024"));
		assert!(html.contains("Acme"));
		assert!(html.contains("class=\"tag\">maps"));
		// No role in the frontmatter, no role row
		assert!(!html.contains("Role"));
	}

	#[test]
	fn test_error_page_escapes_message() {
		let html = error_page("<script>boom</script>");
		assert!(html.contains("&lt;script&gt;boom&lt;/script&gt;"));
		assert!(html.contains("href=\"/\""));
	}
}
