// ABOUTME: Property bulk importer and gate configurator for a newly registered tenant
// ABOUTME: Chunked multi-row inserts whose reported counts are the rows that actually landed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::outcome::{ProvisioningStep, StepOutcome};
use crate::database_plugins::{
    factory::Database, DatabaseProvider, GATE_INSERT_COLUMNS, PROPERTY_INSERT_COLUMNS,
};
use crate::errors::AppResult;
use crate::models::{Gate, GateDescriptor, Property, PropertyDescriptor, TenantId};
use std::future::Future;
use tracing::{debug, info, warn};

/// Insert properties tagged with `tenant_id`, `batch_size` rows per statement
pub async fn import_properties(
    database: &Database,
    tenant_id: TenantId,
    descriptors: &[PropertyDescriptor],
    batch_size: usize,
) -> StepOutcome<u64> {
    let rows: Vec<Property> = descriptors
        .iter()
        .cloned()
        .map(|d| Property::from_descriptor(tenant_id, d))
        .collect();

    insert_in_chunks(
        ProvisioningStep::ImportProperties,
        tenant_id,
        &rows,
        chunk_size(
            batch_size,
            database
                .database_type()
                .max_rows_per_insert(PROPERTY_INSERT_COLUMNS),
        ),
        |chunk| database.create_properties(chunk),
    )
    .await
}

/// Insert gates tagged with `tenant_id`, `batch_size` rows per statement
pub async fn configure_gates(
    database: &Database,
    tenant_id: TenantId,
    descriptors: &[GateDescriptor],
    batch_size: usize,
) -> StepOutcome<u64> {
    let rows: Vec<Gate> = descriptors
        .iter()
        .cloned()
        .map(|d| Gate::from_descriptor(tenant_id, d))
        .collect();

    insert_in_chunks(
        ProvisioningStep::ConfigureGates,
        tenant_id,
        &rows,
        chunk_size(
            batch_size,
            database
                .database_type()
                .max_rows_per_insert(GATE_INSERT_COLUMNS),
        ),
        |chunk| database.create_gates(chunk),
    )
    .await
}

/// Clamp the configured batch size to what one statement can bind
fn chunk_size(batch_size: usize, max_rows: usize) -> usize {
    let size = batch_size.clamp(1, max_rows.max(1));
    if size < batch_size {
        debug!(
            configured = batch_size,
            clamped = size,
            "Batch size exceeds bind parameter limit; clamping"
        );
    }
    size
}

/// Run `insert` over consecutive chunks, continuing past failed chunks
async fn insert_in_chunks<'a, T, F, Fut>(
    step: ProvisioningStep,
    tenant_id: TenantId,
    rows: &'a [T],
    chunk_size: usize,
    insert: F,
) -> StepOutcome<u64>
where
    F: Fn(&'a [T]) -> Fut,
    Fut: Future<Output = AppResult<u64>>,
{
    if rows.is_empty() {
        debug!(step = %step, tenant_id = %tenant_id, "Nothing to insert");
        return StepOutcome::Ok(0);
    }

    let mut created: u64 = 0;
    let mut failures: Vec<String> = Vec::new();

    for (index, chunk) in rows.chunks(chunk_size.max(1)).enumerate() {
        match insert(chunk).await {
            Ok(count) => created += count,
            Err(e) => {
                warn!(
                    step = %step,
                    tenant_id = %tenant_id,
                    chunk = index,
                    rows = chunk.len(),
                    error = %e,
                    "Chunk insert failed; continuing with remaining chunks"
                );
                failures.push(format!("chunk {index}: {e}"));
            }
        }
    }

    if failures.is_empty() {
        info!(step = %step, tenant_id = %tenant_id, created, "Rows inserted");
        StepOutcome::Ok(created)
    } else {
        warn!(
            step = %step,
            tenant_id = %tenant_id,
            created,
            requested = rows.len(),
            failed_chunks = failures.len(),
            "Rows partially inserted"
        );
        StepOutcome::SoftFail {
            reason: failures.join("; "),
            salvaged: created,
        }
    }
}
