use bbrs_op_queue::OpQueueError;
use bbrs_ultra_honk::ProverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoblinError {
    #[error("commitment key holds {available} points but the op queue needs {required}")]
    CommitmentKeyTooSmall { required: usize, available: usize },
    #[error("previous aggregate transcript is empty")]
    EmptyPreviousAggregate,
    #[error("op queue has no cached commitments for the previous aggregate")]
    MissingCommitmentData,
    #[error("global CRS is not initialized or has fewer than {requested} points")]
    CrsNotInitialized { requested: usize },
    #[error("goblin session is sealed; prove() has already run")]
    Sealed,
    #[error("no merge proof has been constructed")]
    NoMergeProof,
    #[error("verification keys for the trace and translation stages exist only after prove()")]
    NotYetProven,
    #[error(transparent)]
    Prover(#[from] ProverError),
    #[error(transparent)]
    OpQueue(#[from] OpQueueError),
}
