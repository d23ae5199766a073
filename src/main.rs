use clap::Parser;
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use media_timeline::feed::{self, file};
use media_timeline::{FeedStatus, GalleryConfig, MediaItem, MediaLibrary, Result};

/// Print a journal media snapshot as a date-sectioned grid and walk it
#[derive(Parser, Debug)]
#[command(name = "media-timeline", version)]
struct Args {
    /// JSON file holding an array of journal entries
    #[arg(long)]
    input: PathBuf,

    /// Tag query (case-insensitive substring)
    #[arg(long, default_value = "")]
    query: String,

    /// Items per grid row (overrides the config file)
    #[arg(long)]
    row_size: Option<usize>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the detail view at SECTION,ROW,COLUMN
    #[arg(long, value_parser = parse_grid_position)]
    open: Option<GridPosition>,

    /// Navigation after opening: n = next, p = previous, c = close
    #[arg(long, default_value = "")]
    steps: String,
}

#[derive(Debug, Clone, Copy)]
struct GridPosition {
    section: usize,
    row: usize,
    column: usize,
}

fn parse_grid_position(value: &str) -> std::result::Result<GridPosition, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [section, row, column] = parts.as_slice() else {
        return Err(format!("expected SECTION,ROW,COLUMN, got '{}'", value));
    };
    let number = |part: &str| {
        part.parse::<usize>()
            .map_err(|e| format!("invalid coordinate '{}': {}", part, e))
    };

    Ok(GridPosition {
        section: number(*section)?,
        row: number(*row)?,
        column: number(*column)?,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::load_or_default()?,
    };
    if let Some(row_size) = args.row_size {
        config.row_size = row_size;
    }

    let library = Arc::new(Mutex::new(MediaLibrary::new(config)?));
    lock(&library).set_query(args.query.as_str());

    // The file stands in for the remote feed: one snapshot, then closed
    let (sender, events) = mpsc::channel(1);
    let subscription = feed::subscribe(args.input.display().to_string(), events, library.clone());
    file::publish_file(args.input.clone(), sender).await;
    subscription.finished().await;

    let mut library = lock(&library);
    print!("{}", render_gallery(&library));

    if let Some(position) = args.open {
        let opened = library
            .open(position.section, position.row, position.column)
            .cloned();
        print_current("open", opened.as_ref(), &library);

        for step in args.steps.chars() {
            let shown = match step {
                'n' => library.next().cloned(),
                'p' => library.prev().cloned(),
                'c' => {
                    library.close();
                    None
                }
                _ => {
                    info!(%step, "ignoring unknown navigation step");
                    continue;
                }
            };
            print_current(&step.to_string(), shown.as_ref(), &library);
        }
    }

    Ok(())
}

fn lock(library: &Mutex<MediaLibrary>) -> MutexGuard<'_, MediaLibrary> {
    library.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Text view of the gallery: feed state, then each section's rows
fn render_gallery(library: &MediaLibrary) -> String {
    let mut out = String::new();

    match library.status() {
        FeedStatus::Unavailable(reason) => {
            // Keep showing the last good snapshot below the failure
            let _ = writeln!(out, "Media unavailable: {}", reason);
        }
        FeedStatus::Loading => {
            out.push_str("Loading media...\n");
            return out;
        }
        FeedStatus::Ready => {}
    }

    if library.is_empty() {
        out.push_str("No media uploaded yet.\n");
        return out;
    }

    for (index, section) in library.sections().iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", index, section.header());
        for row in &section.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|item| format!("{} ({})", item.id, item.kind.as_str()))
                .collect();
            let _ = writeln!(out, "    {}", cells.join("  "));
        }
    }
    out
}

fn print_current(step: &str, item: Option<&MediaItem>, library: &MediaLibrary) {
    let position = library.cursor().position();
    match item {
        Some(item) => println!(
            "{:>4}  ({}, {})  {} {}",
            step, position.section, position.item, item.id, item.url
        ),
        None => println!("{:>4}  view closed", step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_timeline::MediaType;

    fn item(id: &str, date: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            url: format!("https://cdn/{id}.jpg"),
            kind: MediaType::Image,
            upload_date: date.to_string(),
            tags: Vec::new(),
            journal_id: "j1".to_string(),
        }
    }

    #[test]
    fn test_unavailable_feed_still_renders_last_snapshot() {
        let mut library = MediaLibrary::new(GalleryConfig::default()).unwrap();
        library.replace_items(vec![item("a", "10 June 2024"), item("b", "09 June 2024")]);
        library.mark_unavailable("offline");

        let text = render_gallery(&library);

        assert!(text.starts_with("Media unavailable: offline"));
        assert!(text.contains("[0] 10 June 2024"));
        assert!(text.contains("[1] 09 June 2024"));
        assert!(text.contains("a (image)"));
    }

    #[test]
    fn test_render_states() {
        let mut library = MediaLibrary::new(GalleryConfig::default()).unwrap();
        assert_eq!(render_gallery(&library), "Loading media...\n");

        library.replace_items(Vec::new());
        assert_eq!(render_gallery(&library), "No media uploaded yet.\n");
    }

    #[test]
    fn test_parse_grid_position() {
        let position = parse_grid_position("1, 2,0").unwrap();
        assert_eq!((position.section, position.row, position.column), (1, 2, 0));
        assert!(parse_grid_position("1,2").is_err());
        assert!(parse_grid_position("a,b,c").is_err());
    }
}
