use crate::application::engine::GroupSettlement;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransferRow<'a> {
    group: &'a str,
    from: &'a str,
    to: &'a str,
    amount: Decimal,
}

/// Writes settlement transfers as CSV, one `group,from,to,amount` row per
/// transfer.
pub struct TransferWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TransferWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_settlements(&mut self, settlements: &[GroupSettlement]) -> Result<()> {
        for settlement in settlements {
            for transfer in &settlement.transfers {
                self.writer.serialize(TransferRow {
                    group: &settlement.group.0,
                    from: &transfer.from.0,
                    to: &transfer.to.0,
                    amount: transfer.amount.value(),
                })?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
