use rand::RngCore;

/// Supplies the `txHash` sent with each swap attempt.
pub trait TxHashSource: Send + Sync {
    fn next_hash(&self) -> String;
}

/// Stub identifier: 32 random bytes as `0x`-prefixed hex. The service only
/// records it; it is not a signed or broadcast transaction.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTxHash;

impl TxHashSource for RandomTxHash {
    fn next_hash(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!("0x{}", hex::encode(bytes))
    }
}
