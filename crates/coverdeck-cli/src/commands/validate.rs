use anyhow::{Context, Result};

use coverdeck_core::deck::{DeckSource, Item, JsonFileSource, MediaKind};
use coverdeck_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let source = JsonFileSource::new(config.deck_path());
    let deck = source
        .load_deck()
        .with_context(|| format!("Invalid deck {}", source.path().display()))?;

    let videos = deck.iter().filter(|i| i.media_kind == MediaKind::Video).count();
    println!(
        "{}: {} items ({} images, {} videos)",
        source.path().display(),
        deck.len(),
        deck.len() - videos,
        videos
    );

    for warning in warnings(&deck) {
        println!("  warning: {}", warning);
    }

    Ok(())
}

/// Problems that don't stop the deck from loading but will look wrong
fn warnings(deck: &[Item]) -> Vec<String> {
    let mut out = Vec::new();
    if deck.is_empty() {
        out.push("deck is empty".to_string());
    }
    for item in deck {
        if item.sources.src.is_empty() {
            out.push(format!("{} has no src", item.id));
        }
        if item.title.is_empty() {
            out.push(format!("{} has no title", item.id));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings() {
        assert_eq!(warnings(&[]), vec!["deck is empty".to_string()]);

        let mut ok = Item::new("a", "Alpha", MediaKind::Image);
        ok.sources.src = "media/a.jpg".to_string();
        assert!(warnings(&[ok]).is_empty());

        let bare = Item::new("b", "", MediaKind::Video);
        assert_eq!(
            warnings(&[bare]),
            vec!["b has no src".to_string(), "b has no title".to_string()]
        );
    }
}
