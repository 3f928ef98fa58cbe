//! Bundled listings shown when the remote store is unreachable, and merged
//! after remote results otherwise.

use chrono::{DateTime, Utc};

use curated_core::{Category, Listing, ListingId, Price, UserId};

const UNSPLASH: &str = "https://images.unsplash.com";

fn photo(id: &str) -> String {
    format!("{UNSPLASH}/photo-{id}?auto=format&fit=crop&w=800&q=80")
}

fn avatar(id: &str) -> String {
    format!("{UNSPLASH}/photo-{id}?auto=format&fit=crop&w=100&h=100&q=80")
}

struct Seed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    dollars: u32,
    category: Category,
    location: &'static str,
    photos: [&'static str; 4],
    seller_id: &'static str,
    seller_name: &'static str,
    seller_avatar: &'static str,
    verified: bool,
}

const SEEDS: [Seed; 6] = [
    Seed {
        id: "l1",
        title: "Hand-Poured Sandalwood & Bourbon Soy Candle",
        description: "Elevate your space with our signature slow-burning soy candle. Poured in small batches in Portland, OR. Featuring a crackling wood wick and premium phthalate-free oils.\n\nCrafted for those who appreciate the finer details of home ambiance, this sandalwood and bourbon blend brings a warm, smoky depth to any room. Each candle is hand-poured into a recycled glass jar and finished with a minimalist label.",
        dollars: 32,
        category: Category::HomeLiving,
        location: "Portland, Oregon",
        photos: [
            "1603006905003-be475563bc59",
            "1602872030219-cbf917468c84",
            "1596433809252-260c2745dfdd",
            "1572726710307-99cc29accbbd",
        ],
        seller_id: "u2",
        seller_name: "Wildwood Botanicals",
        seller_avatar: "1438761681033-6461ffad8d80",
        verified: true,
    },
    Seed {
        id: "l2",
        title: "Personalized Horween Leather Slim Wallet",
        description: "Classic American craftsmanship. Made from world-famous Horween leather. Each piece is hand-stitched with waxed linen thread. Monogram included.\n\nThis wallet is designed to age beautifully, developing a unique patina that tells the story of your journeys. It holds 4-6 cards and folded cash comfortably without adding bulk to your pocket.",
        dollars: 75,
        category: Category::Personalized,
        location: "Austin, Texas",
        photos: [
            "1627123424574-724758594e93",
            "1550520299-59895ad01acc",
            "1614352238028-85cc2ad7a851",
            "1598532213005-52257b52d0c5",
        ],
        seller_id: "u6",
        seller_name: "Lone Star Leather",
        seller_avatar: "1500648767791-00dcc994a43e",
        verified: true,
    },
    Seed {
        id: "l3",
        title: "Minimalist Hand-Thrown Ceramic Mug in Speckled Oat",
        description: "Start your morning with art you can hold. Ergonomically designed for the perfect grip. Microwave and dishwasher safe. Lead-free glazes.\n\nEvery mug is thrown on the wheel in my Asheville studio, resulting in slight variations that make your piece truly one of a kind. The speckled oat glaze has a beautiful tactile quality that feels grounding in your hands.",
        dollars: 42,
        category: Category::HomeLiving,
        location: "Asheville, NC",
        photos: [
            "1514228742587-6b1558fbed50",
            "1481833761820-0509d3217039",
            "1577937932623-30ee68201530",
            "1536939459926-301728717817",
        ],
        seller_id: "u3",
        seller_name: "Earth & Ember",
        seller_avatar: "1494790108377-be9c29b29330",
        verified: true,
    },
    Seed {
        id: "l4",
        title: "Hand-Woven Merino Wool Wall Hanging",
        description: "A statement piece for your modern nursery or living room. Intricately woven using sustainable merino wool and driftwood foraged from the California coast.\n\nThis textile art adds warmth and texture to any wall. The organic flow of the weave reflects the natural landscapes of the Pacific Northwest, bringing a touch of the outdoors inside.",
        dollars: 185,
        category: Category::ArtCollectibles,
        location: "Brooklyn, NY",
        photos: [
            "1528459105426-b924fd83359d",
            "1576016773322-79344449836e",
            "1519710164239-da123dc03ef4",
            "1520408222757-6f9f95d87d5d",
        ],
        seller_id: "u4",
        seller_name: "Thread & Fiber",
        seller_avatar: "1544005313-94ddf0286df2",
        verified: true,
    },
    Seed {
        id: "l5",
        title: "Raw Emerald 14k Gold Filled Branch Ring",
        description: "Inspired by the organic forms of nature. This unique stacking ring features a natural, uncut Colombian emerald. Nickel-free and hypoallergenic.\n\nThe branch-like texture of the band is hand-sculpted in wax before being cast in 14k gold fill. It celebrates the perfectly imperfect beauty of raw gemstones.",
        dollars: 128,
        category: Category::Jewelry,
        location: "Seattle, WA",
        photos: [
            "1605100804763-247f67b3557e",
            "1543294001-f7cd5d7fb516",
            "1535632066927-ab7c9ab60908",
            "1515562141207-7a88fb7ce338",
        ],
        seller_id: "u5",
        seller_name: "Solstice Jewelry",
        seller_avatar: "1506794778202-cad84cf45f1d",
        verified: true,
    },
    Seed {
        id: "l6",
        title: "Organic Lavender & Sea Salt Bath Soak",
        description: "Transform your bathroom into a spa. Made with French Grey Sea Salt and therapeutic-grade lavender essential oils. Vegan and cruelty-free.\n\nSprinkle a handful into your evening bath to soothe tired muscles and quiet the mind. The blend includes dried botanicals from my own organic garden for a truly sensory experience.",
        dollars: 24,
        category: Category::WellnessBath,
        location: "Savannah, GA",
        photos: [
            "1570194065650-d99fb4b8ccb0",
            "1584305650150-1845474c3d82",
            "1620916566398-39f1143ab7be",
            "1596755094514-f87e34085b2c",
        ],
        seller_id: "u7",
        seller_name: "Botanical Soul",
        seller_avatar: "1517841905240-472988babdf9",
        verified: false,
    },
];

/// The bundled listings, stamped with `created_at`.
#[must_use]
pub fn bundled_listings(created_at: DateTime<Utc>) -> Vec<Listing> {
    SEEDS
        .iter()
        .map(|seed| Listing {
            id: ListingId::new(seed.id),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            price: Price::from_cents(seed.dollars * 100),
            category: seed.category,
            location: seed.location.to_string(),
            images: seed.photos.iter().map(|p| photo(p)).collect(),
            seller_id: UserId::new(seed.seller_id),
            seller_name: seed.seller_name.to_string(),
            seller_avatar: avatar(seed.seller_avatar),
            created_at,
            verified: seed.verified,
            discount: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_listings_are_displayable() {
        let listings = bundled_listings(Utc::now());
        assert_eq!(listings.len(), 6);
        assert!(listings.iter().all(Listing::has_displayable_image));
        assert!(listings.iter().all(|l| l.images.len() == 4));
    }

    #[test]
    fn test_bundled_ids_are_unique() {
        let listings = bundled_listings(Utc::now());
        let mut ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids, vec!["l1", "l2", "l3", "l4", "l5", "l6"]);
    }

    #[test]
    fn test_bundled_prices() {
        let listings = bundled_listings(Utc::now());
        assert_eq!(listings[0].price.to_string(), "$32.00");
        assert_eq!(listings[3].price.to_string(), "$185.00");
    }
}
