use chrono::Local;
use sqlx::{types::Json, PgPool};

use crate::{
    model::destination::{Destination, PhotoLocation},
    repository::destination::{get_destination_without_content, update_destination},
};

use super::ContentReport;

const HILL_STATIONS: [&str; 5] = ["Mussoorie", "Shimla", "Nainital", "Coorg", "Ooty"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    Palace,
    Beach,
    HillStation,
    International,
    General,
}

impl DestinationKind {
    pub fn of(destination: &Destination) -> Self {
        let state = destination.state.as_deref().unwrap_or_default();
        if state == "Rajasthan" {
            DestinationKind::Palace
        } else if destination.name == "Goa" || state == "Goa" || state == "Kerala" {
            DestinationKind::Beach
        } else if HILL_STATIONS.contains(&destination.name.as_str()) {
            DestinationKind::HillStation
        } else if destination.country != "India" {
            DestinationKind::International
        } else {
            DestinationKind::General
        }
    }
}

fn planning_tips(destination: &Destination, kind: DestinationKind) -> Vec<String> {
    match kind {
        DestinationKind::Palace => vec![
            "Book palace venues 12-18 months in advance for peak season (October-March), popular dates fill quickly.".to_string(),
            "Consider weekday weddings for better availability and potentially 20-30% cost savings.".to_string(),
            "Visit during your intended wedding season to experience the weather and lighting conditions firsthand.".to_string(),
            "Work with local vendors who understand heritage venue restrictions and traditions.".to_string(),
            format!("Plan for guest activities, {} offers rich cultural experiences beyond the wedding.", destination.name),
            "Budget for premium accommodations, heritage properties have limited rooms requiring overflow planning.".to_string(),
        ],
        DestinationKind::Beach => [
            "Monsoon season (June-September) should be avoided, book for October-April for ideal beach weather.",
            "Always have an indoor backup venue in your contract, coastal weather can be unpredictable.",
            "Plan for humidity when selecting fabrics for bridal wear and decor materials.",
            "Schedule outdoor ceremonies around sunset (5-6 PM) for magical golden hour lighting.",
            "Book water activities and beach excursions for guests to round out the destination experience.",
            "Consider beach-appropriate footwear options for guests and communicate dress code clearly.",
        ]
        .map(String::from)
        .to_vec(),
        DestinationKind::HillStation => [
            "Book for the shoulder seasons (March-May, September-November) for pleasant weather.",
            "Plan for temperature variations, evenings can be significantly cooler than daytime.",
            "Road connectivity can be affected by weather, have contingency transport plans.",
            "Mountain venues often have limited capacity, plan for intimate celebrations.",
            "Natural lighting in hills is exceptional, schedule photo sessions accordingly.",
            "Local florals and greenery can reduce decor costs while enhancing the natural setting.",
        ]
        .map(String::from)
        .to_vec(),
        DestinationKind::International => [
            "Start visa processes for guests 4-6 months before the wedding to avoid delays.",
            "Work with destination wedding specialists who have local vendor networks.",
            "Consider currency fluctuations when budgeting, lock rates where possible.",
            "Plan for varied dietary requirements of international and Indian guests.",
            "Book group travel for better rates on flights and transfers.",
            "Ensure all vendors have experience with Indian wedding customs and rituals.",
        ]
        .map(String::from)
        .to_vec(),
        DestinationKind::General => [
            "Research peak wedding dates (November-February) and book venues 9-12 months ahead.",
            "Visit venues in person before finalizing, photos don't capture the full experience.",
            "Create a realistic budget and add 15-20% contingency for unexpected expenses.",
            "Hire a local wedding planner who understands regional vendors and customs.",
            "Communicate clearly with guests about travel, accommodation, and dress expectations.",
            "Plan activities for guests during the multi-day celebration to keep everyone engaged.",
        ]
        .map(String::from)
        .to_vec(),
    }
}

fn insider_secrets(kind: DestinationKind) -> Vec<String> {
    let secrets: [&str; 5] = match kind {
        DestinationKind::Palace => [
            "Heritage venues often have restrictions on nail/screw installations, use weighted decor bases.",
            "Local Rajasthani musicians (Langa/Manganiyar) add authentic cultural depth to celebrations.",
            "Many palace venues have undiscovered photo spots, ask the property team for hidden gems.",
            "Rajasthani cuisine is exceptional, feature regional specialties for an authentic experience.",
            "Vintage car and elephant processions are signature experiences, book well in advance.",
        ],
        DestinationKind::Beach => [
            "The best beach lighting for photos is 30-45 minutes before sunset, plan ceremonies accordingly.",
            "Beach mandaps work best with sturdy bases, wind can be a factor even on calm days.",
            "Local seafood is exceptional, feature Goan/coastal cuisine prominently in menus.",
            "Beach bonfires require permits, the venue team handles this but book early.",
            "Pool parties are more popular than beach parties for sangeet thanks to easier logistics.",
        ],
        DestinationKind::International => [
            "Many international venues have experience with NRI weddings, ask for references.",
            "Local vendors often offer better value than bringing Indian vendors abroad.",
            "Time zone differences affect coordination, establish clear communication protocols.",
            "Currency exchange timing can significantly impact your overall budget.",
            "Some destinations require specific permits for traditional Indian wedding rituals.",
        ],
        DestinationKind::HillStation | DestinationKind::General => [
            "Off-peak months (April-June, August-September) offer significant venue discounts.",
            "Local vendor networks often provide better service than big-city imports.",
            "Weather contingency clauses in contracts protect against unexpected cancellations.",
            "Many venues have preferred vendor lists that include negotiated discounts.",
            "Social media reviews often reveal venue strengths not mentioned in brochures.",
        ],
    };
    secrets.map(String::from).to_vec()
}

fn best_photo_locations(kind: DestinationKind) -> Vec<PhotoLocation> {
    let spots: [(&str, &str); 5] = match kind {
        DestinationKind::Palace => [
            ("Palace courtyards at golden hour", "4:30-6:00 PM"),
            ("Heritage archways and corridors", "Morning light (8-10 AM)"),
            ("Rooftop with city skyline views", "Blue hour (6:30-7:00 PM)"),
            ("Lake or water features at dawn", "Sunrise (6:00-7:00 AM)"),
            ("Grand entrance stairways", "Midday (diffused lighting)"),
        ],
        DestinationKind::Beach => [
            ("Beach at sunset", "5:30-6:30 PM (golden hour)"),
            ("Infinity pool reflections", "Early morning (6-7 AM)"),
            ("Palm-lined pathways", "Morning (8-10 AM) or evening (4-5 PM)"),
            ("Jetty or pier", "Blue hour (6:15-6:45 PM)"),
            ("Beach at sunrise", "5:30-6:30 AM for empty beach shots"),
        ],
        DestinationKind::HillStation => [
            ("Mountain viewpoints at sunrise", "5:30-7:00 AM"),
            ("Valley overlooks", "4:00-6:00 PM"),
            ("Forest trails", "Morning (9-11 AM) for dappled light"),
            ("Colonial architecture spots", "Any time with clear weather"),
            ("Sunset points", "5:00-6:30 PM"),
        ],
        DestinationKind::International | DestinationKind::General => [
            ("Venue gardens at golden hour", "4:30-6:00 PM"),
            ("Architectural features", "Morning (8-10 AM)"),
            ("Poolside reflections", "Early morning or blue hour"),
            ("Local landmarks", "Varies by location"),
            ("Indoor venues with natural light", "Midday (10 AM-2 PM)"),
        ],
    };
    spots
        .into_iter()
        .map(|(spot, timing)| PhotoLocation {
            spot: spot.to_string(),
            timing: timing.to_string(),
        })
        .collect()
}

pub fn fill_destination(destination: &mut Destination) {
    let kind = DestinationKind::of(destination);
    destination.planning_tips = planning_tips(destination, kind);
    destination.insider_secrets = insider_secrets(kind);
    destination.best_photo_locations = Json(best_photo_locations(kind));
}

/// Generate content for every destination that has none, in one transaction.
pub async fn generate_destination_content(
    pool: &PgPool,
    dry_run: bool,
) -> anyhow::Result<ContentReport> {
    let mut tx = pool.begin().await?;
    let destinations = get_destination_without_content(&mut tx).await?;
    let mut report = ContentReport {
        pending: destinations.len(),
        updated: 0,
    };
    if dry_run {
        for destination in destinations.iter() {
            tracing::info!(
                "would fill {} as {:?}",
                destination.slug,
                DestinationKind::of(destination)
            );
        }
        return Ok(report);
    }

    let now = Local::now().fixed_offset();
    for mut destination in destinations {
        fill_destination(&mut destination);
        update_destination(&mut tx, &mut destination, &now).await?;
        tracing::debug!("filled destination {}", destination.slug);
        report.updated += 1;
    }
    tx.commit().await?;
    Ok(report)
}
