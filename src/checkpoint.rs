multiversx_sc::imports!();

use crate::errors::ERR_CHECKPOINT_IN_PAST;
use crate::types::{Checkpoint, CheckpointSubject};

/// Append-only value history per subject, keyed by block nonce.
///
/// A subject holds at most one checkpoint per point: several writes within
/// the same block overwrite the last entry instead of appending.
#[multiversx_sc::module]
pub trait CheckpointModule {
    fn current_point(&self) -> u64 {
        self.blockchain().get_block_nonce()
    }

    fn write_checkpoint(
        &self,
        subject: &CheckpointSubject<Self::Api>,
        point: u64,
        value: &BigUint,
    ) {
        let mut history = self.checkpoints(subject);
        let len = history.len();
        if len > 0 {
            let mut last = history.get(len);
            require!(point >= last.point, ERR_CHECKPOINT_IN_PAST);
            if last.point == point {
                last.value = value.clone();
                history.set(len, &last);
                return;
            }
        }

        history.push(&Checkpoint {
            point,
            value: value.clone(),
        });
    }

    /// Value in effect at `point`: the checkpoint with the greatest point
    /// not after it, zero when the history starts later.
    fn value_at(&self, subject: &CheckpointSubject<Self::Api>, point: u64) -> BigUint {
        let history = self.checkpoints(subject);
        let len = history.len();
        if len == 0 {
            return BigUint::zero();
        }

        let last = history.get(len);
        if point >= last.point {
            return last.value;
        }

        let first = history.get(1);
        if point < first.point {
            return BigUint::zero();
        }

        // history[low].point <= point < history[high + 1].point
        let mut low = 1usize;
        let mut high = len - 1;
        while low < high {
            let mid = (low + high + 1) / 2;
            if history.get(mid).point <= point {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
        history.get(low).value
    }

    fn latest_value(&self, subject: &CheckpointSubject<Self::Api>) -> BigUint {
        let history = self.checkpoints(subject);
        let len = history.len();
        if len == 0 {
            BigUint::zero()
        } else {
            history.get(len).value
        }
    }

    #[view(getCheckpointCount)]
    fn get_checkpoint_count(&self, subject: CheckpointSubject<Self::Api>) -> usize {
        self.checkpoints(&subject).len()
    }

    #[storage_mapper("checkpoints")]
    fn checkpoints(
        &self,
        subject: &CheckpointSubject<Self::Api>,
    ) -> VecMapper<Checkpoint<Self::Api>>;
}
