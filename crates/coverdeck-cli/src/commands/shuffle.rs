use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use coverdeck_core::deck::{DeckSource, JsonFileSource, NavigationOrder};
use coverdeck_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let deck = JsonFileSource::new(config.deck_path()).load_deck()?;

    let mut rng = match config.general.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let order = NavigationOrder::shuffled(deck.len(), &mut rng);

    for (slot, deck_index) in order.iter().enumerate() {
        let item = &deck[deck_index];
        println!("{:>3}  {:<12} {}", slot, item.id, item.display_title());
    }

    Ok(())
}
