use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};
use strum::IntoEnumIterator;

use crate::forecast::{Config, DerivedMarket, Forecast, HalftimeFulltime};
use crate::linear::Matrix;

pub fn tabulate_markets(forecast: &Forecast, config: &Config) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Market".into(), "Probability".into()],
        ));
    for market in DerivedMarket::iter() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                market.label(config).into(),
                format!("{:.3}", market.value(forecast)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_combinations(combinations: &[HalftimeFulltime]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(12)).with(Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["HT/FT".into(), "Probability".into()],
        ));
    for combination in combinations {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                combination.to_string().into(),
                format!("{:.1}%", combination.weight * 100.0).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_scoregrid(scoregrid: &Matrix) -> Table {
    let mut cols = vec![Col::new(Styles::default().with(MinWidth(4)).with(Left))];
    for _ in 0..scoregrid.cols() {
        cols.push(Col::new(
            Styles::default().with(MinWidth(9)).with(HAlign::Right),
        ));
    }
    let mut header = vec!["".into()];
    for away_goals in 0..scoregrid.cols() {
        header.push(format!("{away_goals}").into());
    }
    let mut table = Table::default()
        .with_cols(cols)
        .with_row(Row::new(Styles::default().with(Header(true)), header));
    for home_goals in 0..scoregrid.rows() {
        let mut cells = vec![format!("{home_goals}").into()];
        for away_goals in 0..scoregrid.cols() {
            cells.push(format!("{:.4}", scoregrid[(home_goals, away_goals)]).into());
        }
        table.push_row(Row::new(Styles::default(), cells));
    }
    table
}
