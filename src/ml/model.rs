use burn::{
    nn::{Embedding, EmbeddingConfig, Linear, LinearConfig},
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SkipGramConfig {
    pub vocab_size:    usize,
    pub embedding_dim: usize,
}

impl SkipGramConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SkipGramModel<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let output = LinearConfig::new(self.embedding_dim, self.vocab_size)
            .with_bias(false)
            .init(device);
        SkipGramModel { embedding, output }
    }
}

#[derive(Module, Debug)]
pub struct SkipGramModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> SkipGramModel<B> {
    /// centers: [batch] → logits over the whole vocabulary: [batch, vocab_size]
    pub fn forward(&self, centers: Tensor<B, 1, Int>) -> Tensor<B, 2> {
        let [batch_size] = centers.dims();

        // Embedding lookup wants a [batch, seq] index tensor; each center
        // word is its own length-1 sequence
        let embedded = self.embedding.forward(centers.reshape([batch_size, 1]));
        let [_, _, dim] = embedded.dims();

        self.output.forward(embedded.reshape([batch_size, dim]))
    }

    /// Cross-entropy of the predicted context distribution against the
    /// sampled context words. Loss = mean over the batch.
    pub fn forward_loss(
        &self,
        centers: Tensor<B, 1, Int>,
        labels:  Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(centers);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), labels);
        (loss, logits)
    }

    /// Embedding rows scaled to unit L2 norm, so a row·row dot product
    /// is the cosine similarity between two words.
    pub fn normalized_embeddings(&self) -> Tensor<B, 2> {
        let weights = self.embedding.weight.val();
        let [vocab, dim] = weights.dims();

        let norm = weights.clone().powf_scalar(2.0).sum_dim(1).sqrt();
        weights / norm.expand([vocab, dim])
    }
}
