// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Step-based skip-gram training with Adam.
//
// Key Burn 0.20 insight:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns model on MyInnerBackend (Wgpu),
//     which is what the read-only neighbour sampling runs on
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};
use rand::{rngs::StdRng, SeedableRng};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SkipGramBatcher, dataset::TextDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{MetricsLogger, StepMetrics};
use crate::ml::model::{SkipGramConfig, SkipGramModel};
use crate::ml::neighbors;

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

/// Neighbours shown per sampled word during training
const NEIGHBORS_SHOWN: usize = 8;

pub fn run_training(
    cfg:          &TrainConfig,
    dataset:      &TextDataset,
    ckpt_manager: CheckpointManager,
    metrics:      MetricsLogger,
) -> Result<()> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, dataset, ckpt_manager, metrics, device)
}

fn train_loop(
    cfg:          &TrainConfig,
    dataset:      &TextDataset,
    ckpt_manager: CheckpointManager,
    metrics:      MetricsLogger,
    device:       burn::backend::wgpu::WgpuDevice,
) -> Result<()> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = SkipGramConfig::new(dataset.vocabulary.len(), cfg.embedding_dim);
    let mut model: SkipGramModel<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} embeddings of dimension {}",
        dataset.vocabulary.len(),
        cfg.embedding_dim,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Batch generator ───────────────────────────────────────────────────────
    // Sampling parameters were validated by TrainConfig, but the batcher
    // re-checks them against the actual corpus length.
    let mut batcher = SkipGramBatcher::new(
        dataset.data.clone(),
        cfg.skip_window,
        cfg.num_skips,
        cfg.seed,
    )?;
    let mut sample_rng = StdRng::seed_from_u64(cfg.seed);

    // ── Step loop ─────────────────────────────────────────────────────────────
    let mut loss_sum = 0.0f64;
    for step in 1..=cfg.steps {
        let (centers, labels) = batcher.next_batch(cfg.batch_size);
        let centers = Tensor::<MyBackend, 1, Int>::from_ints(centers.as_slice(), &device);
        let labels  = Tensor::<MyBackend, 1, Int>::from_ints(labels.as_slice(), &device);

        let (loss, _) = model.forward_loss(centers, labels);
        loss_sum += loss.clone().into_scalar().elem::<f64>();

        // Backward pass + Adam update
        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(cfg.lr, model, grads);

        if step % cfg.log_every == 0 {
            let avg_loss = loss_sum / cfg.log_every as f64;
            println!("Average loss at step {}: {:.4}", step, avg_loss);
            metrics.log(&StepMetrics::new(step, avg_loss))?;
            loss_sum = 0.0;
        }

        if step % cfg.sample_every == 0 {
            // model.valid() → SkipGramModel<MyInnerBackend>
            // no autodiff overhead for the read-only similarity pass
            let model_valid = model.valid();
            let ids = neighbors::sample_frequent_ids(
                dataset.vocabulary.len(),
                &mut sample_rng,
            );
            println!("After {} steps:", step);
            neighbors::print_nearest(
                &model_valid,
                &dataset.vocabulary,
                &ids,
                NEIGHBORS_SHOWN,
            );
        }

        if step % cfg.checkpoint_every == 0 {
            ckpt_manager.save_model(&model, step)?;
            tracing::info!("Checkpoint saved at step {}", step);
        }
    }

    // Final weights, whatever the checkpoint cadence was
    ckpt_manager.save_model(&model, cfg.steps)?;
    tracing::info!("Training complete!");
    Ok(())
}
