//! Builds the exported workbooks from scored officials.

use super::table::{Field, Table};
use crate::aggregate::{round2, sort_by_role, sort_officials, OfficialKey};
use crate::record::Official;
use crate::scan::Rejection;
use crate::taxonomy::Taxonomy;
use crate::weight::WeightModel;
use chrono::Datelike;
use std::collections::BTreeSet;

pub const APPLICANTS_SHEET: &str = "Applicants";

pub fn summary_header(taxonomy: &Taxonomy) -> Vec<Field> {
    ["Name", "Ref Cert", "NSO Cert", "Total Games"]
        .into_iter()
        .chain(taxonomy.report_columns())
        .map(Field::from)
        .collect()
}

/// One applicant line; roles without a score for `model` are left blank.
pub fn summary_row(official: &Official, model: &str, taxonomy: &Taxonomy) -> Vec<Field> {
    let mut row: Vec<Field> = vec![
        official.name.as_str().into(),
        official.ref_certification.into(),
        official.nso_certification.into(),
        official.game_tally().into(),
    ];
    row.extend(
        taxonomy
            .report_columns()
            .into_iter()
            .map(|column| official.weight_for(model, column).map_or(Field::Empty, Field::from)),
    );
    row
}

pub fn role_header() -> Vec<Field> {
    ["Name", "Cert", "Weight", "Qualified Games"]
        .into_iter()
        .map(Field::from)
        .collect()
}

/// The applicants summary followed by one ranking sheet per role and family.
/// Applicants are listed by `order`: names ascending, everything else highest
/// first.
pub fn results_tables(
    officials: &[Official],
    model: &str,
    taxonomy: &Taxonomy,
    order: OfficialKey,
) -> Vec<Table> {
    let mut applicants = Table::new(APPLICANTS_SHEET);
    applicants.rows.push(summary_header(taxonomy));
    let descending = order != OfficialKey::Name;
    for official in sort_officials(officials, order, descending) {
        applicants.rows.push(summary_row(official, model, taxonomy));
    }

    let mut tables = vec![applicants];
    for column in taxonomy.report_columns() {
        let mut table = Table::new(column);
        table.rows.push(role_header());
        for ranked in sort_by_role(officials, column, model, taxonomy, true) {
            table.rows.push(vec![
                ranked.name.into(),
                ranked.certification.into(),
                ranked.weight.into(),
                ranked.qualified.into(),
            ]);
        }
        tables.push(table);
    }
    tables
}

/// Every official and every game, with each game weighed by `model`.
pub fn raw_dump_tables(
    officials: &[Official],
    model: &WeightModel,
    taxonomy: &Taxonomy,
) -> Vec<Table> {
    let mut people = Table::new("Officials");
    people.push(["Name", "Ref Cert", "Ref Tally", "NSO Cert", "NSO Tally"]);
    let mut games = Table::new("Games");
    games.push([
        "Name",
        "Association",
        "Age",
        "Date",
        "Type",
        "Role",
        "Weight",
        "Event",
        "Primacy",
    ]);

    for official in officials {
        people.rows.push(vec![
            official.name.as_str().into(),
            official.ref_certification.into(),
            official.ref_tally().into(),
            official.nso_certification.into(),
            official.nso_tally().into(),
        ]);
        for game in official.games() {
            games.rows.push(vec![
                official.name.as_str().into(),
                game.association().into(),
                game.age().into(),
                game.date()
                    .map_or(Field::Empty, |date| Field::from(date.to_string())),
                game.game_type().into(),
                game.role().into(),
                round2(model.weight(game, taxonomy)).into(),
                game.event().into(),
                u32::from(game.primacy().rank()).into(),
            ]);
        }
    }
    vec![people, games]
}

pub fn rejects_table(rejected: &[Rejection]) -> Table {
    let mut table = Table::new("Rejects");
    table.push(["File", "Reason"]);
    for rejection in rejected {
        table.push([rejection.source.clone(), rejection.reason.to_string()]);
    }
    table
}

/// Unique (name, year, event, type, role) tuples for games with an event label.
pub fn events_table(officials: &[Official]) -> Table {
    let events: BTreeSet<(&str, i32, &str, &str, &str)> = officials
        .iter()
        .flat_map(|official| {
            official.games().iter().filter_map(move |game| {
                let event = game.event()?;
                let year = game.date()?.year();
                Some((
                    official.name.as_str(),
                    year,
                    event,
                    game.game_type(),
                    game.role(),
                ))
            })
        })
        .collect();

    let mut table = Table::new("Events");
    table.push(["Name", "Year", "Event", "Type", "Role"]);
    for (name, year, event, game_type, role) in events {
        table.rows.push(vec![
            name.into(),
            year.into(),
            event.into(),
            game_type.into(),
            role.into(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RejectReason;
    use crate::record::{Game, Primacy};
    use chrono::NaiveDate;

    fn official(name: &str, taxonomy: &Taxonomy, roles: &[(&str, Primacy)]) -> Official {
        let mut official = Official::new(name);
        official.ref_certification = 2;
        official.nso_certification = 4;
        let date = NaiveDate::from_ymd_opt(2018, 7, 1).expect("valid date");
        for (role, primacy) in roles {
            let game = Game::new(taxonomy, "WFTDA", "Playoff", Some(*role), 0, *primacy)
                .expect("game should be valid")
                .with_date(date)
                .with_event(Some("Playoffs".to_string()));
            official.add_game(game);
        }
        official
    }

    fn scored(taxonomy: &Taxonomy) -> (Vec<Official>, WeightModel) {
        let model = WeightModel::new("std", taxonomy);
        let mut officials = vec![
            official("Zed", taxonomy, &[("CHR", Primacy::Primary)]),
            official("Amy", taxonomy, &[("JR", Primacy::Primary), ("JR", Primacy::Secondary)]),
        ];
        for official in &mut officials {
            official.apply_weight_models(std::slice::from_ref(&model), taxonomy);
        }
        (officials, model)
    }

    #[test]
    fn summary_header_lists_every_role_and_family() {
        let taxonomy = Taxonomy::default();
        let header = summary_header(&taxonomy);
        assert_eq!(header[0], Field::from("Name"));
        assert_eq!(header[3], Field::from("Total Games"));
        assert_eq!(header.len(), 4 + taxonomy.report_columns().len());
        assert_eq!(header.last(), Some(&Field::from("Penalty Tracking")));
    }

    #[test]
    fn results_sort_applicants_by_name_and_rank_roles() {
        let taxonomy = Taxonomy::default();
        let (officials, _) = scored(&taxonomy);
        let tables = results_tables(&officials, "std", &taxonomy, OfficialKey::Name);

        assert_eq!(tables.len(), 1 + taxonomy.report_columns().len());
        let applicants = &tables[0];
        assert_eq!(applicants.rows[1][0], Field::from("Amy"));
        assert_eq!(applicants.rows[2][0], Field::from("Zed"));
        assert_eq!(applicants.rows[1][3], Field::from(1u32));

        let chr = tables.iter().find(|t| t.name == "CHR").expect("CHR sheet");
        assert_eq!(chr.rows.len(), 2);
        assert_eq!(chr.rows[1], vec![Field::from("Zed"), 2u8.into(), 1.2f64.into(), 1u32.into()]);

        let jr = tables.iter().find(|t| t.name == "JR").expect("JR sheet");
        assert_eq!(jr.rows[1], vec![Field::from("Amy"), 2u8.into(), 2.0f64.into(), 1u32.into()]);
    }

    #[test]
    fn applicants_follow_requested_order() {
        let taxonomy = Taxonomy::default();
        let (officials, _) = scored(&taxonomy);
        let tables = results_tables(&officials, "std", &taxonomy, OfficialKey::RefTally);
        // Both have one referee game; the stable sort keeps input order.
        assert_eq!(tables[0].rows[1][0], Field::from("Zed"));
        assert_eq!(tables[0].rows[2][0], Field::from("Amy"));
    }

    #[test]
    fn raw_dump_has_one_row_per_game() {
        let taxonomy = Taxonomy::default();
        let (officials, model) = scored(&taxonomy);
        let tables = raw_dump_tables(&officials, &model, &taxonomy);

        assert_eq!(tables[0].rows.len(), 3);
        assert_eq!(tables[1].rows.len(), 4);
        let secondary = &tables[1].rows[3];
        assert_eq!(secondary[0], Field::from("Amy"));
        assert_eq!(secondary[3], Field::from("2018-07-01"));
        assert_eq!(secondary[8], Field::from(2u32));
    }

    #[test]
    fn raw_dump_weights_are_rounded() {
        let taxonomy = Taxonomy::default();
        let mut model = WeightModel::new("std", &taxonomy);
        model.set_weight("WFTDA", "Playoff", 0.1);
        model.secondary_role_factor = 3.0;
        let (officials, _) = scored(&taxonomy);
        let tables = raw_dump_tables(&officials, &model, &taxonomy);

        // 0.1 * 3.0 is 0.30000000000000004 before rounding.
        let secondary = &tables[1].rows[3];
        assert_eq!(secondary[6], Field::from(0.3f64));
    }

    #[test]
    fn events_are_unique() {
        let taxonomy = Taxonomy::default();
        let (officials, _) = scored(&taxonomy);
        let table = events_table(&officials);
        // Amy's two JR games collapse into one event row.
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1][0], Field::from("Amy"));
        assert_eq!(table.rows[1][1], Field::from(2018i32));
    }

    #[test]
    fn rejects_table_lists_reasons() {
        let table = rejects_table(&[Rejection {
            source: "old.json".to_string(),
            reason: RejectReason::UnsupportedVersion,
        }]);
        assert_eq!(
            table.rows[1],
            vec![Field::from("old.json"), Field::from("unsupported document version")]
        );
    }
}
