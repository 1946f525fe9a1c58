//! Plain-text floorplan and budget summaries used in replies

use super::budget::{self, COST_PER_SQFT, format_area, format_currency};
use super::floorplan::Floorplan;
use super::room::RoomType;

/// Average floor size used to estimate the number of storeys
const SQFT_PER_FLOOR: f64 = 1000.0;

/// Summary of a floorplan with the budget analysis
pub fn summarize_floorplan(
    floorplan: &Floorplan,
    total_area: f64,
    estimated_cost: f64,
    user_budget: Option<f64>,
) -> String {
    if floorplan.is_empty() {
        return "❌ **No rooms in current floorplan**".to_string();
    }

    let floors = estimated_floors(total_area);
    let per_floor = total_area / floors as f64;

    let mut out = String::from("✅ **Draft Floorplan v1 (simulation)**\n");
    out.push_str(&format!("- Floors: {}\n", floors));
    out.push_str(&format!("- Total area: {} ft²", format_area(total_area)));
    if floors > 1 {
        out.push_str(&format!(" (approx. {} ft² per floor)", format_area(per_floor)));
    }
    out.push('\n');

    if per_floor > 0.0 {
        let lot_width = ((per_floor.sqrt() * 1.2) as u64).max(1);
        let lot_depth = (per_floor / lot_width as f64 * 2.5) as u64;
        out.push_str(&format!("- Lot shape: {}' × {}' rectangle\n", lot_width, lot_depth));
    }

    out.push_str("- Rooms:\n");
    for kind in RoomType::DISPLAY_ORDER {
        for room in floorplan.rooms().iter().filter(|r| r.kind() == kind) {
            out.push_str(&format!("  - {}: {}' × {}'\n", room.name(), room.length(), room.width()));
        }
    }

    out.push_str("\n💰 **Budget Analysis:**\n");
    out.push_str(&format!("- Estimated cost: {}\n", format_currency(estimated_cost)));
    if total_area > 0.0 {
        out.push_str(&format!("- Cost per sq ft: ${:.2}\n", estimated_cost / total_area));
    }

    if let Some(budget) = budget::active_budget(user_budget) {
        let cmp = budget::compare(estimated_cost, budget);
        out.push_str(&format!("- Your budget: {}\n", format_currency(budget)));
        if cmp.within {
            out.push_str("- Status: ✅ Within budget\n");
            out.push_str(&format!(
                "- Under by: {} ({:.1}%)\n",
                format_currency(cmp.amount),
                cmp.percent_of_budget()
            ));
        } else {
            out.push_str("- Status: ⚠️ Over budget\n");
            out.push_str(&format!(
                "- Over by: {} ({:.1}%)\n",
                format_currency(cmp.amount),
                cmp.percent_of_budget()
            ));
        }
    }

    out
}

/// Short budget status block for the interactive session
pub fn budget_status(estimated_cost: Option<f64>, user_budget: Option<f64>) -> String {
    let Some(budget) = budget::active_budget(user_budget) else {
        return "💰 **Budget:** Not set".to_string();
    };

    let cost = match estimated_cost {
        Some(cost) if cost > 0.0 => cost,
        _ => {
            return format!(
                "💰 **Budget:** {}\n\n⏳ Add some rooms to see cost analysis!",
                format_currency(budget)
            );
        }
    };

    let cmp = budget::compare(cost, budget);
    if cmp.within {
        format!(
            "✅ **Within Budget**\n💰 Budget: {}\n💸 Estimated: {}\n💚 Under by: {}",
            format_currency(budget),
            format_currency(cost),
            format_currency(cmp.amount)
        )
    } else {
        format!(
            "⚠️ **Over Budget**\n💰 Budget: {}\n💸 Estimated: {}\n🔴 Over by: {} ({:.1}%)",
            format_currency(budget),
            format_currency(cost),
            format_currency(cmp.amount),
            cmp.percent_of_budget()
        )
    }
}

/// Per-room cost breakdown for the interactive session
pub fn cost_breakdown(floorplan: &Floorplan) -> String {
    if floorplan.is_empty() {
        return "📊 **Cost Analysis**\n\nNo rooms to analyze yet.".to_string();
    }

    let total_area = floorplan.total_area();
    let mut out = String::from("📊 **Cost Breakdown**\n\n");
    out.push_str(&format!("🏠 Total Area: {} sq ft\n", format_area(total_area)));
    out.push_str(&format!("💲 Cost per sq ft: ${}\n", COST_PER_SQFT));
    out.push_str(&format!(
        "💰 Total Estimated Cost: {}\n\n",
        format_currency(budget::estimate_cost(total_area))
    ));
    out.push_str("**Room Details:**\n");
    for room in floorplan.rooms() {
        out.push_str(&format!(
            "• {}: {} sq ft ({})\n",
            room.name(),
            format_area(room.area()),
            format_currency(budget::estimate_cost(room.area()))
        ));
    }
    out
}

/// Storey estimate; halves round to even
fn estimated_floors(total_area: f64) -> u32 {
    ((total_area / SQFT_PER_FLOOR).round_ties_even() as u32).max(1)
}
