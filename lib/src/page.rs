use std::fmt::Write;

use crate::config::Settings;
use crate::layout::{Head, Layout, PageKind};
use crate::post::Post;
use crate::util::escape_html;

/// Path of the list page, relative to the site root.
pub const BLOG_PATH: &str = "/blog/";

/// Path of a post's detail page, relative to the site root.
pub fn post_path(slug: &str) -> String {
    format!("{BLOG_PATH}{slug}/")
}

/// Renders the blog index: one card per post, in the given order, or the
/// "no posts" placeholder when there are none.
pub fn render_list(posts: &[Post], layout: &Layout, settings: &Settings) -> String {
    let text = &settings.blog;
    let mut cards = String::new();
    if posts.is_empty() {
        let _ = write!(cards, r#"<p class="card">{}</p>"#, escape_html(&text.empty));
    }

    for (i, post) in posts.iter().enumerate() {
        if i > 0 {
            cards.push('\n');
        }

        cards.push_str("<article class=\"card blog-card\">\n");
        let meta = post.meta_line();
        if !meta.is_empty() {
            let _ = writeln!(cards, r#"  <p class="blog-meta">{}</p>"#, escape_html(&meta));
        }

        let _ = write!(cards, r#"  <h2><a class="blog-link" href="{href}">{title}</a></h2>
  <p>{description}</p>
</article>"#,
            href = escape_html(&post_path(&post.slug)),
            title = escape_html(&post.title),
            description = escape_html(&post.description),
        );
    }

    let body = format!(r#"<main id="conteudo-principal">
  <section class="section">
    <div class="container">
      <p class="hero-kicker">{kicker}</p>
      <h1>{heading}</h1>
      <p>{intro}</p>
      <div class="grid grid-two" style="margin-top:1.5rem;">
        {cards}
      </div>
    </div>
  </section>
</main>"#,
        kicker = escape_html(&text.kicker),
        heading = escape_html(&text.heading),
        intro = escape_html(&text.intro),
    );

    let canonical = settings.absolute(BLOG_PATH);
    let head = Head {
        title: &text.title,
        description: &text.description,
        canonical: &canonical,
        image: None,
        kind: PageKind::Website,
    };

    layout.render(settings, &head, &body)
}

/// Renders a post's detail page. The post's HTML body is trusted and
/// inserted as is.
pub fn render_post(post: &Post, layout: &Layout, settings: &Settings) -> String {
    let text = &settings.blog;
    let title = escape_html(&post.title);
    let cover = match &post.featured_image {
        Some(src) => format!(
            r#"<figure class="post-cover"><img src="{}" alt="{title}"></figure>"#,
            escape_html(src),
        ),
        None => String::new(),
    };

    let body = format!(r#"<main id="conteudo-principal">
  <section class="section">
    <div class="container">
      <p class="hero-kicker">{kicker}</p>
      <p class="blog-meta">{meta}</p>
      <h1>{title}</h1>
      <p class="lead">{lead}</p>
      {cover}
      <article class="post-body markdown">{html}</article>
      <p class="blog-link" style="margin-top:1.5rem;"><a href="{BLOG_PATH}">{back}</a></p>
    </div>
  </section>
</main>"#,
        kicker = escape_html(&text.kicker),
        meta = escape_html(&post.meta_line()),
        lead = escape_html(&post.description),
        html = post.html,
        back = text.back,
    );

    let page_title = format!("{} | {}", post.title, text.post_title_suffix);
    let description = match post.description.as_str() {
        "" => text.post_description.as_str(),
        description => description,
    };

    let mut canonical = settings.absolute(BLOG_PATH);
    canonical.append(&post.slug).make_dir();
    let image = post.featured_image.as_deref().map(|src| settings.absolute(src));
    let head = Head {
        title: &page_title,
        description,
        canonical: &canonical,
        image: image.as_deref(),
        kind: PageKind::Article,
    };

    layout.render(settings, &head, &body)
}
