//! Dashboard metrics over a user's leads.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use funil_core::entities::Lead;
use funil_core::enums::FunnelStage;
use funil_core::responses::{FunnelSummary, StageCount};

/// Count leads per stage and compute the headline funnel numbers.
///
/// "This month" starts at 00:00 UTC on the first day of `now`'s month. Leads
/// without a `created_at` never count as new.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(leads: &[Lead], now: DateTime<Utc>) -> FunnelSummary {
    let month_start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc());

    let mut counts = [0usize; FunnelStage::ALL.len()];
    let mut unknown = 0;
    let mut new_this_month = 0;

    for lead in leads {
        match lead.stage() {
            Some(stage) => counts[stage.ordinal()] += 1,
            None => unknown += 1,
        }
        if let (Some(created), Some(start)) = (lead.created_at, month_start)
            && created >= start
        {
            new_this_month += 1;
        }
    }

    let total = leads.len();
    let won: usize = FunnelStage::ALL
        .into_iter()
        .filter(|stage| stage.is_won())
        .map(|stage| counts[stage.ordinal()])
        .sum();
    let conversion_rate = if total == 0 {
        0.0
    } else {
        won as f64 / total as f64 * 100.0
    };

    FunnelSummary {
        total_leads: total,
        new_leads_this_month: new_this_month,
        won_leads: won,
        conversion_rate,
        unknown_stage_leads: unknown,
        stages: FunnelStage::ALL
            .into_iter()
            .map(|stage| StageCount {
                stage,
                column_id: stage.column_id().to_string(),
                count: counts[stage.ordinal()],
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn created(id: &str, stage: FunnelStage, at: DateTime<Utc>) -> Lead {
        Lead {
            created_at: Some(at),
            ..Lead::new(id, format!("Lead {id}"), stage)
        }
    }

    #[test]
    fn empty_funnel_has_zero_conversion() {
        let summary = summarize(&[], Utc::now());
        assert_eq!(summary.total_leads, 0);
        assert!(summary.conversion_rate.abs() < f64::EPSILON);
        assert_eq!(summary.stages.len(), 6);
    }

    #[test]
    fn counts_stages_won_and_new_leads() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let mut odd = Lead::new("5", "Caio", FunnelStage::Novo);
        odd.funnel_stage = "Perdido".into();

        let leads = vec![
            created("1", FunnelStage::Novo, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            created("2", FunnelStage::Fechado, Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap()),
            created("3", FunnelStage::Fechado, Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()),
            Lead::new("4", "Dora", FunnelStage::Negociacao),
            odd,
        ];

        let summary = summarize(&leads, now);

        assert_eq!(summary.total_leads, 5);
        assert_eq!(summary.new_leads_this_month, 2);
        assert_eq!(summary.won_leads, 2);
        assert_eq!(summary.unknown_stage_leads, 1);
        assert!((summary.conversion_rate - 40.0).abs() < 1e-9);

        let by_column: Vec<(&str, usize)> = summary
            .stages
            .iter()
            .map(|s| (s.column_id.as_str(), s.count))
            .collect();
        assert_eq!(
            by_column,
            vec![
                ("novo", 1),
                ("qualificacao", 0),
                ("visita-agendada", 0),
                ("proposta", 0),
                ("negociacao", 1),
                ("fechado", 2),
            ]
        );
    }
}
