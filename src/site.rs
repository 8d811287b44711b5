//! Site driver: the load → validate → render → audit → export pipeline.
//!
//! # Architecture
//!
//! ```text
//! Site::process()
//!     │
//!     ├── load()      discover entry files, parse each (bad entries are
//!     │               skipped with a warning), partition into
//!     │               published/draft/special, sort, build the tag index
//!     │
//!     ├── validate()  duplicate root-slug gate; fatal for the whole build
//!     │
//!     ├── render()    markdown → HTML per part, autosummaries, entry and
//!     │               archive pages through tera, RSS/Atom feeds
//!     │
//!     ├── audit()     scan feed XML for entities invalid in XML
//!     │
//!     └── export()    write HTML/JSON/feeds, copy assets, link uploads
//! ```
//!
//! Each phase is idempotent; a change-triggered rebuild runs the whole
//! pipeline again from scratch. There is no incremental mode: `load`
//! re-parses every entry file and rebuilds all in-memory structures.

use crate::config::SiteConfig;
use crate::entry::error::EntryError;
use crate::entry::{Entry, EntryList, Part};
use crate::generator::{atom, rss};
use crate::log;
use crate::render::{self, context};
use anyhow::{Context as _, Result, anyhow};
use regex::Regex;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Neighbor window sizes for prev/next linkage.
pub const PREV_ENTRY_COUNT: usize = 5;
pub const NEXT_ENTRY_COUNT: usize = 5;

/// File extensions treated as entry sources.
const ENTRY_EXTENSIONS: &[&str] = &["md", "yaml"];

/// Named XML entities that are predefined and therefore valid in feeds.
const XML_PREDEFINED_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]{1,30});").expect("entity pattern is valid"));

// ============================================================================
// Rendered artifacts
// ============================================================================

/// Rendered archive page and feeds for one entry list.
struct RenderedList {
    html: String,
    rss: Option<String>,
    atom: Option<String>,
}

// ============================================================================
// Site
// ============================================================================

/// Top-level aggregate owning all entry lists and rendered artifacts.
pub struct Site {
    config: &'static SiteConfig,
    dev_mode: bool,

    /// Every successfully loaded entry; lists hold indices into this arena.
    arena: Vec<Entry>,
    published: EntryList,
    drafts: EntryList,
    specials: EntryList,
    tag_map: BTreeMap<String, EntryList>,

    /// Prev/next neighbor ids per published entry id.
    windows: BTreeMap<usize, (Vec<usize>, Vec<usize>)>,

    site_info: Value,
    main_rendered: Option<RenderedList>,
    tag_rendered: BTreeMap<String, RenderedList>,
}

impl Site {
    pub fn new(config: &'static SiteConfig, dev_mode: bool) -> Self {
        Self {
            config,
            dev_mode,
            arena: Vec::new(),
            published: EntryList::new(),
            drafts: EntryList::new(),
            specials: EntryList::new(),
            tag_map: BTreeMap::new(),
            windows: BTreeMap::new(),
            site_info: Value::Null,
            main_rendered: None,
            tag_rendered: BTreeMap::new(),
        }
    }

    /// Run the full pipeline. Nothing is written unless every gate passes.
    pub fn process(&mut self) -> Result<()> {
        self.reset();
        self.load();
        self.validate()?;
        self.render()?;
        self.audit();
        self.export()?;
        Ok(())
    }

    /// Drop all state mutated during processing.
    fn reset(&mut self) {
        self.arena.clear();
        self.published.clear();
        self.drafts.clear();
        self.specials.clear();
        self.tag_map.clear();
        self.windows.clear();
        self.site_info = Value::Null;
        self.main_rendered = None;
        self.tag_rendered.clear();
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Discover and parse every entry file, then build all aggregates.
    ///
    /// One bad entry never aborts the batch: it is logged with its path
    /// and cause, and skipped.
    fn load(&mut self) {
        let entry_paths = discover_entries(&self.config.build.entries);
        log!("load"; "{} entry files discovered", entry_paths.len());

        for path in &entry_paths {
            let entry = match Entry::from_path(path) {
                Ok(entry) => entry,
                Err(err) => {
                    log!("warn"; "skipping {}: {err}", path.display());
                    continue;
                }
            };
            log!("load"; "{} ({:.1}m)", entry.title, entry.reading_time());

            let id = self.arena.len();
            self.arena.push(entry);
            let entry = &self.arena[id];
            if entry.is_special() {
                self.specials.append(id);
            } else if entry.is_draft() {
                self.drafts.append(id);
            } else {
                self.published.append(id);
            }
        }

        self.published.sort_by_publish_date(&self.arena);
        self.specials.sort_by_publish_date(&self.arena);
        self.drafts.sort_by_mtime(&self.arena);

        self.rebuild_tag_map();
        self.rebuild_windows();
    }

    /// Rebuild the tag → entry-list index over the published set.
    fn rebuild_tag_map(&mut self) {
        self.tag_map.clear();
        for &id in &self.published.ids {
            for tag in self.arena[id].tags() {
                self.tag_map
                    .entry(tag.clone())
                    .or_insert_with(|| EntryList::with_tag(&tag))
                    .append(id);
            }
        }
        for list in self.tag_map.values_mut() {
            list.sort_by_publish_date(&self.arena);
        }
    }

    /// Attach prev/next neighbor windows per published entry.
    fn rebuild_windows(&mut self) {
        self.windows.clear();
        let n = self.published.len();
        for (pos, &id) in self.published.ids.iter().enumerate() {
            let (prev_range, next_range) =
                neighbor_windows(n, pos, PREV_ENTRY_COUNT, NEXT_ENTRY_COUNT);
            // prev: chronologically newer, closest first
            let prev: Vec<usize> = prev_range.rev().map(|p| self.published.ids[p]).collect();
            // next: chronologically older, most recent of the older first
            let next: Vec<usize> = next_range.map(|p| self.published.ids[p]).collect();
            self.windows.insert(id, (prev, next));
        }
    }

    // ========================================================================
    // Validate
    // ========================================================================

    /// Duplicate-ID gate: published root slugs must be unique.
    fn validate(&self) -> Result<()> {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in self.published.iter(&self.arena) {
            *seen.entry(entry.entry_root.as_str()).or_default() += 1;
        }
        let duplicates: Vec<String> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(root, _)| root.to_owned())
            .collect();
        if !duplicates.is_empty() {
            return Err(EntryError::Duplicate(duplicates).into());
        }
        Ok(())
    }

    // ========================================================================
    // Render
    // ========================================================================

    /// Render part HTML, summaries, entry pages, archives, and feeds.
    fn render(&mut self) -> Result<()> {
        let templates = self.load_templates()?;
        self.site_info = context::site_info(self.config, self.dev_mode);

        // Part markdown and summaries, then the content page per entry
        for id in 0..self.arena.len() {
            self.render_entry_content(&templates, id)?;
        }

        // Entry pages; published entries carry their neighbor windows
        let mut entry_htmls: Vec<(usize, String)> = Vec::new();
        for &id in &self.published.ids {
            let (prev, next) = &self.windows[&id];
            let prev: Vec<&Entry> = prev.iter().map(|&p| &self.arena[p]).collect();
            let next: Vec<&Entry> = next.iter().map(|&p| &self.arena[p]).collect();
            let dict = context::entry_dict_with_links(&self.arena[id], &prev, &next)?;
            entry_htmls.push((id, self.render_entry_page(&templates, id, dict)?));
        }
        for &id in self.drafts.ids.iter().chain(&self.specials.ids) {
            let dict = context::entry_dict(&self.arena[id])?;
            entry_htmls.push((id, self.render_entry_page(&templates, id, dict)?));
        }
        for (id, html) in entry_htmls {
            self.arena[id].entry_html = Some(html);
        }

        // Archive pages and feeds for the main list and every tag list
        let main = std::mem::take(&mut self.published);
        self.main_rendered = Some(self.render_list(&templates, &main)?);
        self.published = main;

        let tag_map = std::mem::take(&mut self.tag_map);
        for (tag, list) in &tag_map {
            let rendered = self.render_list(&templates, list)?;
            self.tag_rendered.insert(tag.clone(), rendered);
        }
        self.tag_map = tag_map;

        Ok(())
    }

    /// Load the template directory into a tera environment.
    ///
    /// Autoescaping is off: contexts carry pre-rendered HTML fragments
    /// that must pass through verbatim.
    fn load_templates(&self) -> Result<tera::Tera> {
        let glob = self.config.build.templates.join("**/*.html");
        let glob = glob
            .to_str()
            .ok_or_else(|| anyhow!("template path is not valid UTF-8"))?;
        let mut templates = tera::Tera::new(glob).context("failed to load templates")?;
        templates.autoescape_on(vec![]);
        Ok(templates)
    }

    /// Render part markdown, resolve the summary, and render the content
    /// page for one entry.
    fn render_entry_content(&mut self, templates: &tera::Tera, id: usize) -> Result<()> {
        {
            let entry = &mut self.arena[id];
            for part in &mut entry.loaded_parts {
                let html = render::markdown_to_html(part.content().unwrap_or(""));
                part.set_content_html(html);
            }

            entry.rendered_summary = match &entry.summary {
                Some(Value::String(s)) => Some(s.clone()),
                // Structured summaries pass through to templates untouched
                Some(_) => None,
                None => first_part_html(entry).map(render::autosummarize),
            };
        }

        let entry = &self.arena[id];
        let dict = context::entry_dict(entry)?;
        let ctx = context::tera_context(json!({"entry": dict, "site": &self.site_info}))?;
        let name = format!("{}.html", entry.content_layout());
        let html = templates
            .render(&name, &ctx)
            .with_context(|| format!("rendering {name} for {}", entry.entry_root))?;
        self.arena[id].content_html = Some(html);
        Ok(())
    }

    /// Render the full entry page for one entry with a prepared dict.
    fn render_entry_page(
        &self,
        templates: &tera::Tera,
        id: usize,
        dict: serde_json::Map<String, Value>,
    ) -> Result<String> {
        let entry = &self.arena[id];
        let ctx = context::tera_context(json!({"entry": dict, "site": &self.site_info}))?;
        let name = format!("{}.html", entry.entry_layout());
        templates
            .render(&name, &ctx)
            .with_context(|| format!("rendering {name} for {}", entry.entry_root))
    }

    /// Render the archive page and feeds for one entry list.
    fn render_list(&self, templates: &tera::Tera, list: &EntryList) -> Result<RenderedList> {
        let mut entry_dicts = Vec::with_capacity(list.len());
        for &id in &list.ids {
            let (prev, next) = self.windows.get(&id).cloned().unwrap_or_default();
            let prev: Vec<&Entry> = prev.iter().map(|&p| &self.arena[p]).collect();
            let next: Vec<&Entry> = next.iter().map(|&p| &self.arena[p]).collect();
            entry_dicts.push(Value::Object(context::entry_dict_with_links(
                &self.arena[id],
                &prev,
                &next,
            )?));
        }

        let ctx = context::tera_context(json!({
            "entries": entry_dicts,
            "site": &self.site_info,
            "list": context::list_info(self.config, list),
        }))?;
        let name = format!("archive_{}.html", self.config.build.tag_archive_layout);
        let html = templates
            .render(&name, &ctx)
            .with_context(|| format!("rendering {name}"))?;

        let (rss, atom) = if self.config.build.feed.enable {
            (
                Some(rss::render_rss(self.config, list, &self.arena)?),
                Some(atom::render_atom(self.config, list, &self.arena)),
            )
        } else {
            (None, None)
        };

        Ok(RenderedList { html, rss, atom })
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Validate rendered feed XML: named HTML entities other than the five
    /// predefined ones are not legal in XML and break strict feed readers.
    fn audit(&self) {
        let check = |label: &str, xml: &Option<String>| {
            let Some(xml) = xml else { return };
            for captures in ENTITY_RE.captures_iter(xml) {
                let entity = &captures[1];
                if !XML_PREDEFINED_ENTITIES.contains(&entity) {
                    log!("warn"; "{label}: entity &{entity}; is not valid in XML feeds");
                }
            }
        };

        if let Some(rendered) = &self.main_rendered {
            check("rss feed", &rendered.rss);
            check("atom feed", &rendered.atom);
        }
        for (tag, rendered) in &self.tag_rendered {
            check(&format!("rss feed [{tag}]"), &rendered.rss);
            check(&format!("atom feed [{tag}]"), &rendered.atom);
        }
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Write every artifact to the output directory.
    fn export(&self) -> Result<()> {
        let output = &self.config.build.output;
        fs::create_dir_all(output)
            .with_context(|| format!("creating output path {}", output.display()))?;

        for entry in self
            .published
            .iter(&self.arena)
            .chain(self.drafts.iter(&self.arena))
            .chain(self.specials.iter(&self.arena))
        {
            self.export_entry(entry)?;
        }

        // Index is just the most recent published entry for now
        let index_content = self
            .published
            .ids
            .first()
            .and_then(|&id| self.arena[id].entry_html.clone())
            .unwrap_or_else(|| "No entries yet!".to_owned());
        fs::write(output.join("index.html"), index_content)?;

        let main = self
            .main_rendered
            .as_ref()
            .context("render phase must run before export")?;
        fs::write(output.join("archive.html"), &main.html)?;
        self.export_feeds(output, main)?;

        for (tag, rendered) in &self.tag_rendered {
            let tag_dir = output.join(format!("{}{tag}", crate::entry::TAG_PATH_PART));
            fs::create_dir_all(&tag_dir)?;
            fs::write(tag_dir.join("index.html"), &rendered.html)?;
            self.export_feeds(&tag_dir, rendered)?;
        }

        self.copy_assets()?;
        self.link_uploads();

        log!("export"; "site written to {}", output.display());
        Ok(())
    }

    /// Write one entry's HTML page and its machine-readable parts dump.
    fn export_entry(&self, entry: &Entry) -> Result<()> {
        let output = &self.config.build.output;
        let html_path = output.join(entry.output_filename());
        let json_path = output.join(format!("{}.json", entry.entry_root));
        if let Some(parent) = html_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let html = entry
            .entry_html
            .as_deref()
            .context("render phase must run before export")?;
        fs::write(&html_path, html)?;

        // Deterministic export: sorted keys, 2-space indent
        let parts = serde_json::to_value(&entry.loaded_parts)?;
        fs::write(&json_path, serde_json::to_string_pretty(&parts)?)?;
        Ok(())
    }

    /// Write the RSS and Atom feeds of a rendered list into a directory.
    fn export_feeds(&self, dir: &Path, rendered: &RenderedList) -> Result<()> {
        let feed = &self.config.build.feed;
        if let Some(rss) = &rendered.rss {
            fs::write(dir.join(&feed.rss_filename), rss)?;
        }
        if let Some(atom) = &rendered.atom {
            fs::write(dir.join(&feed.atom_filename), atom)?;
        }
        Ok(())
    }

    /// Copy the assets directory into the output, preserving structure.
    fn copy_assets(&self) -> Result<()> {
        let assets = &self.config.build.assets;
        if !assets.is_dir() {
            return Ok(());
        }
        let output = &self.config.build.output;
        for file in WalkDir::new(assets)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let rel = file
                .path()
                .strip_prefix(assets)
                .context("asset path outside assets directory")?;
            let dest = output.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(file.path(), &dest)
                .with_context(|| format!("copying asset {}", file.path().display()))?;
        }
        Ok(())
    }

    /// Symlink the uploads directory into the output so the publish step
    /// follows it instead of copying large binaries around.
    #[cfg(unix)]
    fn link_uploads(&self) {
        let uploads = &self.config.build.uploads;
        if !uploads.is_dir() {
            log!("warn"; "no uploads directory at {}", uploads.display());
            return;
        }
        let link = self.config.build.output.join("uploads");
        if link.is_symlink() {
            fs::remove_file(&link).ok();
        }
        if let Err(e) = std::os::unix::fs::symlink(uploads, &link) {
            log!("warn"; "could not link uploads directory: {e}");
        }
    }

    #[cfg(not(unix))]
    fn link_uploads(&self) {}

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn published_count(&self) -> usize {
        self.published.len()
    }

    pub fn draft_count(&self) -> usize {
        self.drafts.len()
    }

    pub fn special_count(&self) -> usize {
        self.specials.len()
    }
}

/// First part's rendered HTML, the raw material for autosummaries.
fn first_part_html(entry: &Entry) -> Option<&str> {
    entry.loaded_parts.first().and_then(Part::content_html)
}

// ============================================================================
// Discovery
// ============================================================================

/// Find entry files under a directory, lexicographically sorted so load
/// order (and therefore sort tiebreaks) is deterministic.
fn discover_entries(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut paths: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ENTRY_EXTENSIONS.contains(&ext))
        })
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    paths
}

// ============================================================================
// Neighbor windows
// ============================================================================

/// Compute the prev/next index ranges for the entry at 0-based position
/// `i` in a date-descending list of `n` entries.
///
/// `prev` covers up to `prev_w` entries immediately preceding `i`
/// (chronologically newer); `next` covers up to `next_w` entries
/// immediately following (older). Both truncate at the list boundaries.
fn neighbor_windows(
    n: usize,
    i: usize,
    prev_w: usize,
    next_w: usize,
) -> (Range<usize>, Range<usize>) {
    let prev = i.saturating_sub(prev_w)..i;
    let next = (i + 1).min(n)..(i + 1 + next_w).min(n);
    (prev, next)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_windows_middle() {
        let (prev, next) = neighbor_windows(20, 10, 5, 5);
        assert_eq!(prev, 5..10);
        assert_eq!(next, 11..16);
    }

    #[test]
    fn test_neighbor_windows_first() {
        let (prev, next) = neighbor_windows(10, 0, 5, 5);
        assert_eq!(prev.len(), 0);
        assert_eq!(next, 1..6);
    }

    #[test]
    fn test_neighbor_windows_last() {
        let (prev, next) = neighbor_windows(10, 9, 5, 5);
        assert_eq!(prev, 4..9);
        assert_eq!(next.len(), 0);
    }

    #[test]
    fn test_neighbor_windows_lengths_property() {
        // prev length = min(w, i), next length = min(w, n - i - 1),
        // for the 0-based position i
        let w = 5;
        for n in 0..12 {
            for i in 0..n {
                let (prev, next) = neighbor_windows(n, i, w, w);
                assert_eq!(prev.len(), w.min(i), "prev length for n={n} i={i}");
                assert_eq!(next.len(), w.min(n - i - 1), "next length for n={n} i={i}");
            }
        }
    }

    #[test]
    fn test_neighbor_windows_small_list() {
        let (prev, next) = neighbor_windows(1, 0, 5, 5);
        assert!(prev.is_empty());
        assert!(next.is_empty());

        let (prev, next) = neighbor_windows(2, 0, 5, 5);
        assert!(prev.is_empty());
        assert_eq!(next, 1..2);
    }

    #[test]
    fn test_entity_regex() {
        let found: Vec<&str> = ENTITY_RE
            .captures_iter("a &nbsp; b &amp; c &#160; d")
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        // Numeric entities are not matched; named ones are
        assert_eq!(found, vec!["nbsp", "amp"]);
    }

    #[test]
    fn test_predefined_entities() {
        for entity in XML_PREDEFINED_ENTITIES {
            assert!(ENTITY_RE.is_match(&format!("&{entity};")));
        }
    }

    // ------------------------------------------------------------------------
    // Pipeline tests over a scaffolded site
    // ------------------------------------------------------------------------

    const ENTRY_TEMPLATE: &str = "<html><body><h1>{{ entry.title }}</h1>\
{% for p in entry.loaded_parts %}{{ p.content_html }}{% endfor %}\
{% if entry.prev_entries is defined %}\
{% for pe in entry.prev_entries %}[prev:{{ pe.title }}]{% endfor %}\
{% for ne in entry.next_entries %}[next:{{ ne.title }}]{% endfor %}\
{% endif %}</body></html>";

    const CONTENT_TEMPLATE: &str =
        "{% for p in entry.loaded_parts %}{{ p.content_html }}{% endfor %}";

    const ARCHIVE_TEMPLATE: &str = "{% for e in entries %}{{ e.title }};{% endfor %}";

    /// Scaffold a site directory with templates and return a leaked config.
    fn scaffold(dir: &Path) -> &'static SiteConfig {
        fs::create_dir_all(dir.join("entries")).unwrap();
        let templates = dir.join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("entry.html"), ENTRY_TEMPLATE).unwrap();
        fs::write(templates.join("content.html"), CONTENT_TEMPLATE).unwrap();
        fs::write(templates.join("archive_brief.html"), ARCHIVE_TEMPLATE).unwrap();

        let mut config = SiteConfig::default();
        config.base.title = "Test Site".into();
        config.base.tagline = "a test site".into();
        config.base.author = "Alice".into();
        config.base.url = Some("https://example.com".into());
        config.build.entries = dir.join("entries");
        config.build.templates = templates;
        config.build.assets = dir.join("assets");
        config.build.uploads = dir.join("uploads");
        config.build.output = dir.join("site");
        Box::leak(Box::new(config))
    }

    fn write_entry(config: &SiteConfig, name: &str, doc: &str) {
        fs::write(config.build.entries.join(name), doc).unwrap();
    }

    #[test]
    fn test_process_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(
            config,
            "a.md",
            "---\ntitle: Alpha\npublish_date: 2020-01-01\ntags: [essays]\n---\nalpha body\n",
        );
        write_entry(
            config,
            "b.md",
            "---\ntitle: Beta\npublish_date: 2021-01-01\ntags: [essays, code]\n---\nbeta body\n",
        );
        write_entry(config, "c.md", "---\ntitle: Gamma\n---\ndraft body\n");
        write_entry(
            config,
            "d.md",
            "---\ntitle: Delta\nspecial: true\n---\nabout page\n",
        );

        let mut site = Site::new(config, false);
        site.process().unwrap();

        assert_eq!(site.published_count(), 2);
        assert_eq!(site.draft_count(), 1);
        assert_eq!(site.special_count(), 1);

        let output = &config.build.output;
        for file in ["alpha.html", "alpha.json", "beta.html", "gamma.html", "delta.html"] {
            assert!(output.join(file).is_file(), "missing {file}");
        }

        // Index is the most recent published entry
        let index = fs::read_to_string(output.join("index.html")).unwrap();
        assert!(index.contains("<h1>Beta</h1>"));
        assert!(index.contains("beta body"));

        // Archive lists published entries, date-descending
        let archive = fs::read_to_string(output.join("archive.html")).unwrap();
        assert_eq!(archive, "Beta;Alpha;");

        // Feeds at the root and per tag
        assert!(output.join("rss.xml").is_file());
        assert!(output.join("atom.xml").is_file());
        assert!(output.join("tagged/essays/index.html").is_file());
        assert!(output.join("tagged/essays/rss.xml").is_file());
        assert!(output.join("tagged/code/atom.xml").is_file());
        let tag_archive = fs::read_to_string(output.join("tagged/code/index.html")).unwrap();
        assert_eq!(tag_archive, "Beta;");
    }

    #[test]
    fn test_prev_next_rendered_into_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(config, "a.md", "---\ntitle: Old\npublish_date: 2019-01-01\n---\nbody\n");
        write_entry(config, "b.md", "---\ntitle: Mid\npublish_date: 2020-01-01\n---\nbody\n");
        write_entry(config, "c.md", "---\ntitle: New\npublish_date: 2021-01-01\n---\nbody\n");

        let mut site = Site::new(config, false);
        site.process().unwrap();

        let mid = fs::read_to_string(config.build.output.join("mid.html")).unwrap();
        assert!(mid.contains("[prev:New]"), "page was: {mid}");
        assert!(mid.contains("[next:Old]"), "page was: {mid}");

        let newest = fs::read_to_string(config.build.output.join("new.html")).unwrap();
        assert!(!newest.contains("[prev:"));
        assert!(newest.contains("[next:Mid]"));
        assert!(newest.contains("[next:Old]"));
    }

    #[test]
    fn test_duplicate_entry_roots_abort_before_export() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(config, "a.md", "---\ntitle: Same Title\npublish_date: 2020-01-01\n---\none\n");
        write_entry(config, "b.md", "---\ntitle: Same Title\npublish_date: 2021-01-01\n---\ntwo\n");

        let mut site = Site::new(config, false);
        let err = site.process().unwrap_err();
        let entry_err = err.downcast_ref::<EntryError>().unwrap();
        assert!(matches!(entry_err, EntryError::Duplicate(roots) if roots == &["same-title"]));

        // Nothing was written: the previous export stays untouched
        assert!(!config.build.output.join("index.html").exists());
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(config, "good.md", "---\ntitle: Good\npublish_date: 2020-01-01\n---\nbody\n");
        write_entry(config, "bad.md", "no separator at all\n");
        write_entry(config, "worse.md", "---\ntitle: Worse\n---\n- a\n- list\n");

        let mut site = Site::new(config, false);
        site.process().unwrap();

        assert_eq!(site.published_count(), 1);
        assert!(config.build.output.join("good.html").is_file());
    }

    #[test]
    fn test_json_export_shape() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(
            config,
            "a.md",
            "---\ntitle: Alpha\npublish_date: 2020-01-01\n---\nsome *text*\n---\nrole: http://example.com/x\n",
        );

        let mut site = Site::new(config, false);
        site.process().unwrap();

        let raw = fs::read_to_string(config.build.output.join("alpha.json")).unwrap();
        let parts: Value = serde_json::from_str(&raw).unwrap();
        let parts = parts.as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["part_idx"], 1);
        assert!(
            parts[0]["content_html"]
                .as_str()
                .unwrap()
                .contains("<em>text</em>")
        );
        assert_eq!(parts[1]["data_idx"], 1);
        assert_eq!(parts[1]["attrs"][0]["type"], "link");
        // 2-space indentation for external tooling
        assert!(raw.contains("\n  {"));
    }

    #[test]
    fn test_autosummary_attached() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(
            config,
            "a.md",
            "---\ntitle: Alpha\npublish_date: 2020-01-01\n---\nalpha body words\n",
        );

        let mut site = Site::new(config, false);
        site.process().unwrap();

        let rss = fs::read_to_string(config.build.output.join("rss.xml")).unwrap();
        assert!(rss.contains("alpha body words..."));
    }

    #[test]
    fn test_assets_copied() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(config, "a.md", "---\ntitle: Alpha\npublish_date: 2020-01-01\n---\nbody\n");
        fs::create_dir_all(config.build.assets.join("css")).unwrap();
        fs::write(config.build.assets.join("css/style.css"), "body{}").unwrap();

        let mut site = Site::new(config, false);
        site.process().unwrap();

        assert_eq!(
            fs::read_to_string(config.build.output.join("css/style.css")).unwrap(),
            "body{}"
        );
    }

    #[test]
    fn test_no_entries_placeholder_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());

        let mut site = Site::new(config, false);
        site.process().unwrap();

        let index = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert_eq!(index, "No entries yet!");
    }

    #[test]
    fn test_process_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = scaffold(dir.path());
        write_entry(config, "a.md", "---\ntitle: Alpha\npublish_date: 2020-01-01\n---\nbody\n");

        let mut site = Site::new(config, false);
        site.process().unwrap();
        let first = fs::read_to_string(config.build.output.join("alpha.html")).unwrap();
        site.process().unwrap();
        let second = fs::read_to_string(config.build.output.join("alpha.html")).unwrap();
        assert_eq!(first, second);
        assert_eq!(site.published_count(), 1);
    }
}
