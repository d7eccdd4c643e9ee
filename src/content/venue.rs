use chrono::Local;
use sqlx::{types::Json, PgPool};

use crate::{
    model::venue::{BudgetShare, TimelineStep, TitledText, Venue, VendorTip},
    repository::venue::{get_venue_without_content, update_venue},
};

use super::ContentReport;

const HILL_STATIONS: [&str; 6] = [
    "Mussoorie",
    "Shimla",
    "Nainital",
    "Kodaikanal",
    "Ooty",
    "Jim Corbett",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueKind {
    Palace,
    Beach,
    HillStation,
    General,
}

impl VenueKind {
    pub fn of(venue: &Venue) -> Self {
        match venue.category.as_str() {
            "Palace" | "Palace Hotel" | "Heritage Hotel" | "Fort Hotel" => VenueKind::Palace,
            "Beach Resort" => VenueKind::Beach,
            _ if venue.city == "Goa" => VenueKind::Beach,
            _ if HILL_STATIONS.contains(&venue.city.as_str()) => VenueKind::HillStation,
            _ => VenueKind::General,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|x| x.to_string()).collect()
}

fn titled(items: &[(&str, &str)]) -> Vec<TitledText> {
    items
        .iter()
        .map(|(title, description)| TitledText {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

fn unique_selling_points(venue: &Venue, kind: VenueKind) -> Vec<String> {
    match kind {
        VenueKind::Palace => vec![
            format!(
                "Historic {} with authentic royal architecture",
                venue.category.to_lowercase()
            ),
            "Exclusive venue buyout available for complete privacy".to_string(),
            format!("{}-star luxury with heritage charm", venue.star_rating),
            "Expert wedding team with experience in royal celebrations".to_string(),
            "Stunning architecture providing natural photo backdrops".to_string(),
        ],
        VenueKind::Beach => strings(&[
            "Pristine beachfront location with Arabian Sea views",
            "Sunset ceremonies on private beach areas",
            "Perfect blend of luxury resort amenities and natural beauty",
            "Ideal for destination wedding weekend experiences",
            "Water sports and beach activities for guest entertainment",
        ]),
        VenueKind::HillStation => strings(&[
            "Stunning mountain views and natural landscapes",
            "Cool climate perfect for outdoor celebrations year-round",
            "Intimate venue setting surrounded by nature",
            "Unique hill station charm and local traditions",
            "Perfect escape from city heat for destination weddings",
        ]),
        VenueKind::General => vec![
            format!("Premium {}-star luxury accommodations", venue.star_rating),
            "Versatile indoor and outdoor wedding spaces".to_string(),
            "Award-winning culinary team and customizable menus".to_string(),
            "Experienced wedding planning team on-site".to_string(),
            "Excellent connectivity and guest convenience".to_string(),
        ],
    }
}

fn insider_tips(venue: &Venue, kind: VenueKind) -> Vec<String> {
    match kind {
        VenueKind::Palace => {
            let cuisine = venue
                .cuisine_types
                .first()
                .map(String::as_str)
                .unwrap_or("regional");
            vec![
                "Book the largest function space for your main ceremony, the natural lighting is best between 4-6 PM for photography.".to_string(),
                "Request traditional musicians for your baraat, the heritage ambiance enhances authentic cultural experiences.".to_string(),
                "Schedule your mehendi in the courtyard areas where natural light creates perfect photo opportunities.".to_string(),
                format!("The venue's signature {} dishes should be included in your menu for an authentic experience.", cuisine),
                "Ask about heritage suite upgrades for the wedding night, the premium rooms often have special architectural features.".to_string(),
                "Book well in advance for peak season (October-February) as dates fill 12-18 months ahead.".to_string(),
            ]
        }
        VenueKind::Beach => strings(&[
            "Plan outdoor ceremonies for sunset timing, typically 5:30-6:30 PM for the best golden hour light.",
            "Book the beachfront lawn for sangeet, the sea breeze keeps guests comfortable for dancing.",
            "Request a backup indoor venue in your contract, coastal weather can be unpredictable.",
            "The resort's seafood specialties are exceptional, feature local Goan dishes in your menu.",
            "Schedule pool party events for daytime functions, they're a huge hit with guests.",
            "Book beach cabanas for the mehendi, guests love the relaxed tropical vibe.",
        ]),
        VenueKind::HillStation | VenueKind::General => strings(&[
            "Request a site visit during your preferred season to assess natural lighting and weather conditions.",
            "The venue's specialty cuisine should be featured in at least one meal for authentic local flavor.",
            "Book the best photo spots during golden hour, typically 1 hour before sunset.",
            "Coordinate with the in-house wedding team early, they know all the venue's hidden gems.",
            "Ask about off-season discounts, you can often save 20-30% on venue costs.",
            "Request room blocks early for peak dates to ensure all guests stay on property.",
        ]),
    }
}

fn signature_experiences(kind: VenueKind) -> Vec<TitledText> {
    match kind {
        VenueKind::Palace => titled(&[
            ("Royal Welcome Ceremony", "Guests are greeted with traditional tikka, aarti, and rose petals in the grand lobby, setting the tone for a royal celebration."),
            ("Heritage Venue Pheras", "Exchange vows in the venue's most stunning space with heritage architecture as your backdrop and traditional decorations."),
            ("Cultural Performance Evening", "Professional folk artists perform traditional dances and music, immersing guests in local cultural traditions."),
        ]),
        VenueKind::Beach => titled(&[
            ("Sunset Beach Ceremony", "Exchange vows with your toes in the sand as the sun sets over the Arabian Sea, creating magical golden hour photographs."),
            ("Poolside Sangeet Party", "Dance under the stars by the resort pool with professional DJ, tropical cocktails, and beachside ambiance."),
            ("Beach Bonfire Night", "An intimate gathering around a beach bonfire with acoustic music, mocktails, and stargazing on the night before the wedding."),
        ]),
        VenueKind::HillStation | VenueKind::General => titled(&[
            ("Grand Welcome Reception", "A stunning entry experience with traditional welcome rituals, live music, and a champagne toast for arriving guests."),
            ("Ceremony Under the Stars", "Evening ceremonies at the venue's signature outdoor space with fairy lights and elegant floral arrangements."),
            ("Gourmet Culinary Journey", "Multiple live food stations featuring the venue's award-winning cuisine, from local specialties to international favorites."),
        ]),
    }
}

fn photography_spots(kind: VenueKind) -> Vec<String> {
    match kind {
        VenueKind::Palace => strings(&[
            "Grand entrance staircase with heritage architecture",
            "Courtyard with traditional arches and columns",
            "Palace lawns at golden hour",
            "Heritage corridors with intricate artwork",
            "Royal suite balcony with venue panorama",
            "Poolside reflection shots at dusk",
        ]),
        VenueKind::Beach => strings(&[
            "Beach at sunset with golden light",
            "Infinity pool with ocean backdrop",
            "Palm-lined pathways",
            "Private cabanas by the sea",
            "Rooftop deck at blue hour",
            "Jetty or pier extending into water",
        ]),
        VenueKind::HillStation | VenueKind::General => strings(&[
            "Main entrance with venue signage",
            "Landscaped gardens at golden hour",
            "Grand ballroom before guests arrive",
            "Lobby with architectural details",
            "Poolside at sunset",
            "Terrace with city/nature views",
        ]),
    }
}

fn planning_timeline(venue: &Venue) -> Vec<TimelineStep> {
    let rooms = venue
        .accommodation_rooms
        .map(|x| x.to_string())
        .unwrap_or("all".to_string());
    [
        ("12M", format!("Initial inquiry and date blocking for {}", venue.name)),
        ("10M", "Site visit and venue confirmation with booking deposit".to_string()),
        ("8M", format!("Finalize guest list and book {} rooms", rooms)),
        ("6M", "Select and confirm decor, photography, and entertainment vendors".to_string()),
        ("4M", "Menu tasting and finalize catering arrangements".to_string()),
        ("3M", "Complete decor designs and seating arrangements".to_string()),
        ("2M", "Final guest confirmations and room assignments".to_string()),
        ("1M", "Final walkthrough with all vendors and contingency planning".to_string()),
        ("1W", "Guest arrivals and pre-wedding ceremonies begin".to_string()),
    ]
    .into_iter()
    .map(|(months, task)| TimelineStep {
        months: months.to_string(),
        task,
    })
    .collect()
}

fn what_to_expect(venue: &Venue) -> Vec<String> {
    vec![
        "Dedicated wedding coordinator assigned from booking confirmation".to_string(),
        format!("{}-star service standards throughout your stay", venue.star_rating),
        "Complimentary room upgrade for bride and groom on wedding night".to_string(),
        "24-hour room service with full menu availability".to_string(),
        "Traditional welcome ceremony for all arriving guests".to_string(),
        "Concierge service for guest excursions and special requests".to_string(),
        "Post-wedding brunch arrangement options".to_string(),
    ]
}

fn budget_breakdown(venue: &Venue) -> Vec<BudgetShare> {
    let rooms = venue
        .accommodation_rooms
        .map(|x| x.to_string())
        .unwrap_or("N/A".to_string());
    let cuisines = if venue.cuisine_types.is_empty() {
        "multiple".to_string()
    } else {
        venue.cuisine_types.len().to_string()
    };
    [
        ("Venue & Accommodation", "35%", format!("Includes room bookings for {} rooms, venue rental for all events, and basic setup.", rooms)),
        ("Catering & Beverages", "30%", format!("Multi-cuisine menus with {} cuisine options. Budget for 3-4 meals daily over event duration.", cuisines)),
        ("Decor & Florals", "15%", "Professional decoration for ceremony, reception, and common areas. Fresh flowers and mandap setup included.".to_string()),
        ("Photography & Entertainment", "12%", "Professional photography, videography, and entertainment including DJ and live performers.".to_string()),
        ("Guest Experiences & Logistics", "8%", "Includes guest transportation, welcome kits, and activity arrangements.".to_string()),
    ]
    .into_iter()
    .map(|(category, percentage, note)| BudgetShare {
        category: category.to_string(),
        percentage: percentage.to_string(),
        note,
    })
    .collect()
}

fn vendor_recommendations(venue: &Venue) -> Vec<VendorTip> {
    [
        ("Decorator", format!("Choose decorators experienced with {}, they understand the space and any venue-specific restrictions.", venue.name)),
        ("Photographer", "Book photographers who have shot at this venue before, they know the best lighting times and photo locations.".to_string()),
        ("Makeup Artist", format!("Select artists experienced with {}'s climate, humidity and dryness affect makeup longevity.", venue.city)),
        ("Entertainment", "Local musicians and performers add authentic regional flavor to your celebration.".to_string()),
        ("Caterer", "Work with the venue's executive chef to customize menus and include family recipes.".to_string()),
    ]
    .into_iter()
    .map(|(category, tip)| VendorTip {
        category: category.to_string(),
        tip,
    })
    .collect()
}

/// Write every template section onto `venue`. FAQs and policies are left as is.
pub fn fill_venue(venue: &mut Venue) {
    let kind = VenueKind::of(venue);
    venue.unique_selling_points = unique_selling_points(venue, kind);
    venue.insider_tips = insider_tips(venue, kind);
    venue.signature_experiences = Json(signature_experiences(kind));
    venue.photography_spots = photography_spots(kind);
    venue.planning_timeline = Json(planning_timeline(venue));
    venue.what_to_expect = what_to_expect(venue);
    venue.budget_breakdown = Json(budget_breakdown(venue));
    venue.vendor_recommendations = Json(vendor_recommendations(venue));
}

/// Generate content for every venue that has none, in one transaction.
pub async fn generate_venue_content(pool: &PgPool, dry_run: bool) -> anyhow::Result<ContentReport> {
    let mut tx = pool.begin().await?;
    let venues = get_venue_without_content(&mut tx).await?;
    let mut report = ContentReport {
        pending: venues.len(),
        updated: 0,
    };
    if dry_run {
        for venue in venues.iter() {
            tracing::info!("would fill {} as {:?}", venue.slug, VenueKind::of(venue));
        }
        return Ok(report);
    }

    let now = Local::now().fixed_offset();
    for mut venue in venues {
        fill_venue(&mut venue);
        update_venue(&mut tx, &mut venue, &now).await?;
        tracing::debug!("filled venue {}", venue.slug);
        report.updated += 1;
    }
    tx.commit().await?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::{factory::venue::VenueFactory, repository::venue::get_venue_by_id};

    #[sqlx::test]
    async fn test_venue_kind(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut venue = VenueFactory::new().generate_one(&pool, ()).await?;

        // Expect
        venue.category = "Fort Hotel".to_string();
        assert_eq!(VenueKind::of(&venue), VenueKind::Palace);
        venue.category = "Luxury Hotel".to_string();
        venue.city = "Goa".to_string();
        assert_eq!(VenueKind::of(&venue), VenueKind::Beach);
        venue.city = "Shimla".to_string();
        assert_eq!(VenueKind::of(&venue), VenueKind::HillStation);
        venue.city = "Mumbai".to_string();
        assert_eq!(VenueKind::of(&venue), VenueKind::General);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_venue_content(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = VenueFactory::new();
        factory.modified_many(|data, idx, _| Venue {
            name: format!("Umaid Bhawan {}", idx),
            category: "Palace Hotel".to_string(),
            star_rating: 5,
            accommodation_rooms: Some(64),
            unique_selling_points: if idx == 0 {
                vec!["Already written".to_string()]
            } else {
                vec![]
            },
            ..data.clone()
        });
        let venues = factory.generate_many(&pool, 3, ()).await?;

        // When
        let dry = generate_venue_content(&pool, true).await?;
        let report = generate_venue_content(&pool, false).await?;
        let again = generate_venue_content(&pool, false).await?;

        // Expect
        assert_eq!(dry, ContentReport { pending: 2, updated: 0 });
        assert_eq!(report, ContentReport { pending: 2, updated: 2 });
        assert_eq!(again, ContentReport { pending: 0, updated: 0 });
        let mut tx = pool.begin().await?;
        let untouched = get_venue_by_id(&mut tx, &venues[0].id).await?.unwrap();
        assert_eq!(untouched.unique_selling_points, vec!["Already written"]);
        let filled = get_venue_by_id(&mut tx, &venues[1].id).await?.unwrap();
        assert_eq!(
            filled.unique_selling_points[0],
            "Historic palace hotel with authentic royal architecture"
        );
        assert_eq!(
            filled.planning_timeline.0[2].task,
            "Finalize guest list and book 64 rooms"
        );
        assert_eq!(filled.signature_experiences.0[0].title, "Royal Welcome Ceremony");
        Ok(())
    }
}
