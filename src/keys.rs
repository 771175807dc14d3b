//! Utilities to generate private/public key pairs
//!
//! A [`PrivateKey`] is always a scalar in `[1, n-1]`, held as 32 big-endian
//! bytes and wiped on drop. A [`PublicKey`] is always an affine point on
//! secp256k1.

use crate::address::{Network, encode_wif, hash160_to_address};
use crate::curves::Point;
use crate::error::{KeyError, Result};
use crate::ripemd160::hash160;
use crate::secp256k1::SECP256K1;
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{TryCryptoRng, TryRngCore};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size of a serialized private key / field element
pub const KEY_LEN: usize = 32;

/// Draws allowed before a source that keeps yielding out-of-range scalars is
/// treated as broken. A single uniform draw is rejected with probability
/// ~2^-128, so an honest source reaches this cap with probability ~2^-16384.
const MAX_DRAWS: usize = 128;

/// Left-pad `n` into a 32-byte big-endian array. Callers guarantee `n < 2^256`.
fn to_32_bytes(n: &BigUint) -> [u8; KEY_LEN] {
    let bytes = n.to_bytes_be();
    let mut result = [0u8; KEY_LEN];
    let len = bytes.len().min(KEY_LEN);
    result[KEY_LEN - len..].copy_from_slice(&bytes[bytes.len() - len..]);
    result
}

/// Private key - a secp256k1 scalar in `[1, n-1]`
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; KEY_LEN],
}

impl PrivateKey {
    fn in_range(&self) -> bool {
        let d = self.scalar();
        !d.is_zero() && d < SECP256K1.n
    }

    /// Parse big-endian bytes, left-padding anything shorter than 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > KEY_LEN {
            return Err(KeyError::InvalidLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut key = PrivateKey {
            bytes: [0u8; KEY_LEN],
        };
        key.bytes[KEY_LEN - bytes.len()..].copy_from_slice(bytes);
        if !key.in_range() {
            return Err(KeyError::InvalidScalar);
        }
        Ok(key)
    }

    /// Parse a hex private key (even length, at most 64 digits, no `0x` prefix)
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(hex_key)?);
        Self::from_bytes(&bytes)
    }

    pub fn from_biguint(d: &BigUint) -> Result<Self> {
        if d.is_zero() || *d >= SECP256K1.n {
            return Err(KeyError::InvalidScalar);
        }
        Ok(PrivateKey {
            bytes: to_32_bytes(d),
        })
    }

    /// Big-endian 32-byte encoding
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// The scalar `d`
    #[must_use]
    pub fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    /// 64 lowercase hex digits
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    #[must_use]
    pub fn to_decimal(&self) -> String {
        self.scalar().to_str_radix(10)
    }

    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        derive_public_key(self)
    }

    /// Wallet Import Format string for `net`
    #[must_use]
    pub fn to_wif(&self, net: Network, compressed: bool) -> String {
        encode_wif(self, net, compressed)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Public key - an affine point on secp256k1 with SEC1 encoding/decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    x: BigUint,
    y: BigUint,
}

impl PublicKey {
    /// Accept a point only if it is a finite point on secp256k1
    pub fn from_point(pt: &Point) -> Result<Self> {
        let Point::Affine { x, y } = pt else {
            return Err(KeyError::InvalidPublicKey("point at infinity".into()));
        };
        if !SECP256K1.curve.contains(pt) {
            return Err(KeyError::InvalidPublicKey("point is not on the curve".into()));
        }
        Ok(PublicKey {
            x: x.clone(),
            y: y.clone(),
        })
    }

    /// Decode from SEC1 binary format (compressed or uncompressed)
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some(&prefix) = bytes.first() else {
            return Err(KeyError::InvalidPublicKey("empty public key".into()));
        };

        match prefix {
            4 => {
                if bytes.len() != 1 + 2 * KEY_LEN {
                    return Err(KeyError::InvalidLength {
                        expected: 1 + 2 * KEY_LEN,
                        actual: bytes.len(),
                    });
                }
                let x = BigUint::from_bytes_be(&bytes[1..1 + KEY_LEN]);
                let y = BigUint::from_bytes_be(&bytes[1 + KEY_LEN..]);
                Self::from_point(&Point::new(x, y))
            }
            2 | 3 => {
                if bytes.len() != 1 + KEY_LEN {
                    return Err(KeyError::InvalidLength {
                        expected: 1 + KEY_LEN,
                        actual: bytes.len(),
                    });
                }
                let curve = &SECP256K1.curve;
                let p = &curve.p;
                let x = BigUint::from_bytes_be(&bytes[1..]);
                if x >= *p {
                    return Err(KeyError::InvalidPublicKey("x is not a field element".into()));
                }

                // Solve y^2 = x^3 + a*x + b (mod p)
                let y2 = (&x * &x * &x + &curve.a * &x + &curve.b) % p;
                // y = y2^((p+1)/4) mod p (works because p ≡ 3 mod 4 for secp256k1)
                let exp = (p + BigUint::one()) >> 2;
                let mut y = y2.modpow(&exp, p);
                if (&y * &y) % p != y2 {
                    return Err(KeyError::InvalidPublicKey("x is not on the curve".into()));
                }

                let want_odd = prefix == 3;
                if y.bit(0) != want_odd {
                    y = p - &y;
                }
                Self::from_point(&Point::new(x, y))
            }
            other => Err(KeyError::InvalidPublicKey(format!(
                "unknown SEC1 prefix 0x{other:02x}"
            ))),
        }
    }

    /// Encode to SEC1 format
    #[must_use]
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        let x_bytes = to_32_bytes(&self.x);

        if compressed {
            let prefix = if self.y.bit(0) { 0x03 } else { 0x02 };
            let mut result = Vec::with_capacity(1 + KEY_LEN);
            result.push(prefix);
            result.extend_from_slice(&x_bytes);
            result
        } else {
            let mut result = Vec::with_capacity(1 + 2 * KEY_LEN);
            result.push(0x04);
            result.extend_from_slice(&x_bytes);
            result.extend_from_slice(&to_32_bytes(&self.y));
            result
        }
    }

    /// SEC1 encoding as lowercase hex; uncompressed is "04" + X + Y
    #[must_use]
    pub fn to_hex(&self, compressed: bool) -> String {
        hex::encode(self.encode(compressed))
    }

    /// Encode and hash with HASH160
    #[must_use]
    pub fn encode_hash160(&self, compressed: bool) -> [u8; 20] {
        hash160(&self.encode(compressed))
    }

    /// Base58Check address for a specific network
    #[must_use]
    pub fn address(&self, net: Network, compressed: bool) -> String {
        hash160_to_address(&self.encode_hash160(compressed), net)
    }

    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x.clone(), self.y.clone())
    }

    #[must_use]
    pub const fn x(&self) -> &BigUint {
        &self.x
    }

    #[must_use]
    pub const fn y(&self) -> &BigUint {
        &self.y
    }

    /// (x, y) as 64-digit lowercase hex
    #[must_use]
    pub fn xy_hex(&self) -> (String, String) {
        (hex::encode(to_32_bytes(&self.x)), hex::encode(to_32_bytes(&self.y)))
    }

    /// (x, y) in decimal
    #[must_use]
    pub fn xy_decimal(&self) -> (String, String) {
        (self.x.to_str_radix(10), self.y.to_str_radix(10))
    }
}

/// A private key together with its derived public key
#[derive(Debug, Clone)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    #[must_use]
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = derive_public_key(&private_key);
        KeyPair {
            private_key,
            public_key,
        }
    }

    #[must_use]
    pub const fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    #[must_use]
    pub fn wif(&self, net: Network, compressed: bool) -> String {
        self.private_key.to_wif(net, compressed)
    }

    #[must_use]
    pub fn address(&self, net: Network, compressed: bool) -> String {
        self.public_key.address(net, compressed)
    }
}

/// Generate a private key uniformly in `[1, n-1]` from the operating system CSPRNG
pub fn generate_private_key() -> Result<PrivateKey> {
    generate_private_key_with(&mut OsRng)
}

/// Generate a private key from `rng` by rejection sampling 32-byte candidates.
///
/// Fails with [`KeyError::EntropyFailure`] if the source errors, or if it
/// never produces an in-range candidate.
pub fn generate_private_key_with<R>(rng: &mut R) -> Result<PrivateKey>
where
    R: TryRngCore + TryCryptoRng + ?Sized,
{
    for draw in 1..=MAX_DRAWS {
        let mut key = PrivateKey {
            bytes: [0u8; KEY_LEN],
        };
        rng.try_fill_bytes(&mut key.bytes)
            .map_err(|e| KeyError::EntropyFailure(e.to_string()))?;
        if key.in_range() {
            if draw > 1 {
                debug!("private key accepted after {draw} draws");
            }
            return Ok(key);
        }
        trace!("private key candidate outside [1, n-1], redrawing");
    }
    Err(KeyError::EntropyFailure(format!(
        "no scalar in [1, n-1] after {MAX_DRAWS} draws"
    )))
}

/// Derive the public key d*G
#[must_use]
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    match SECP256K1.mul_base(&private_key.scalar()) {
        Point::Affine { x, y } => PublicKey { x, y },
        Point::Infinity => unreachable!("d in [1, n-1] never maps to the point at infinity"),
    }
}

/// Generate a key pair from the operating system CSPRNG
pub fn generate_key_pair() -> Result<KeyPair> {
    Ok(KeyPair::from_private_key(generate_private_key()?))
}

/// Generate a key pair from `rng`
pub fn generate_key_pair_with<R>(rng: &mut R) -> Result<KeyPair>
where
    R: TryRngCore + TryCryptoRng + ?Sized,
{
    Ok(KeyPair::from_private_key(generate_private_key_with(rng)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{CryptoRng, RngCore, SeedableRng};

    /// Always errors, like a starved entropy device
    struct FailingRng;

    impl TryRngCore for FailingRng {
        type Error = std::io::Error;

        fn try_next_u32(&mut self) -> std::result::Result<u32, Self::Error> {
            Err(std::io::Error::other("entropy source starved"))
        }

        fn try_next_u64(&mut self) -> std::result::Result<u64, Self::Error> {
            Err(std::io::Error::other("entropy source starved"))
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> std::result::Result<(), Self::Error> {
            Err(std::io::Error::other("entropy source starved"))
        }
    }

    impl TryCryptoRng for FailingRng {}

    /// Yields a fixed byte forever
    struct ConstantRng(u8);

    impl RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0);
        }
    }

    impl CryptoRng for ConstantRng {}

    #[test]
    fn test_public_key_gen() {
        // Example from Mastering Bitcoin Chapter 4
        let sk = PrivateKey::from_hex(
            "1e99423a4ed27608a15a2616a2b0e9e52ced330ac530edcc32c8ffc6a526aedd",
        )
        .unwrap();
        let (x, y) = sk.public_key().xy_hex();
        assert_eq!(
            x,
            "f028892bad7ed57d2fb57bf33081d5cfcf6f9ed3d3d7f159c2e2fff579dc341a"
        );
        assert_eq!(
            y,
            "07cf33da18bd734c600b96a72bbc4749d5141c90ec8ac328ae52ddfe2e505bdb"
        );
        assert_eq!(
            sk.to_decimal(),
            "13840170145645816737842251482747434280357113762558403558088249138233286766301"
        );
    }

    #[test]
    fn test_private_key_one_yields_generator() {
        let sk = PrivateKey::from_hex("01").unwrap();
        assert_eq!(
            sk.to_hex(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(sk.to_decimal(), "1");
        let pk = sk.public_key();
        assert_eq!(pk.point(), SECP256K1.g);
        assert_eq!(Some(pk.x()), SECP256K1.g.x());
        assert_eq!(Some(pk.y()), SECP256K1.g.y());
        assert_eq!(
            pk.xy_hex(),
            (
                "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798".to_string(),
                "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8".to_string()
            )
        );
    }

    #[test]
    fn test_private_key_rejects_bad_input() {
        assert!(matches!(
            PrivateKey::from_hex("abc"),
            Err(KeyError::MalformedHex(_))
        ));
        assert!(matches!(
            PrivateKey::from_hex("zz"),
            Err(KeyError::MalformedHex(_))
        ));
        assert_eq!(
            PrivateKey::from_hex(&"11".repeat(33)),
            Err(KeyError::InvalidLength {
                expected: 32,
                actual: 33
            })
        );
        assert_eq!(PrivateKey::from_hex(&"00".repeat(32)), Err(KeyError::InvalidScalar));
        assert_eq!(PrivateKey::from_hex(""), Err(KeyError::InvalidScalar));
        // n itself and the all-ones value are out of range
        assert_eq!(
            PrivateKey::from_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
            Err(KeyError::InvalidScalar)
        );
        assert_eq!(PrivateKey::from_hex(&"ff".repeat(32)), Err(KeyError::InvalidScalar));
        assert_eq!(
            PrivateKey::from_biguint(&SECP256K1.n),
            Err(KeyError::InvalidScalar)
        );
        assert!(PrivateKey::from_biguint(&(&SECP256K1.n - 1u32)).is_ok());
    }

    #[test]
    fn test_private_key_debug_is_redacted() {
        let sk = PrivateKey::from_hex("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d")
            .unwrap();
        let rendered = format!("{:?}", KeyPair::from_private_key(sk));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("0c28fca3"));
    }

    #[test]
    fn test_pk_sec_encoding() {
        // Test vectors from Programming Bitcoin Chapter 4
        let tests: [(BigUint, bool, &str); 4] = [
            (
                BigUint::from(5000u32),
                false,
                "04ffe558e388852f0120e46af2d1b370f85854a8eb0841811ece0e3e03d282d57c315dc72890a4f10a1481c031b03b351b0dc79901ca18a00cf009dbdb157a1d10",
            ),
            (
                BigUint::from(5001u32),
                true,
                "0357a4f368868a8a6d572991e484e664810ff14c05c0fa023275251151fe0e53d1",
            ),
            (
                BigUint::parse_bytes(b"deadbeef12345", 16).unwrap(),
                false,
                "04d90cd625ee87dd38656dd95cf79f65f60f7273b67d3096e68bd81e4f5342691f842efa762fd59961d0e99803c61edba8b3e3f7dc3a341836f97733aebf987121",
            ),
            (
                BigUint::parse_bytes(b"deadbeef54321", 16).unwrap(),
                true,
                "0296be5b1292f6c856b3c5654e886fc13511462059089cdf9c479623bfcbe77690",
            ),
        ];

        for (scalar, compressed, expected_sec) in tests {
            let pk = PrivateKey::from_biguint(&scalar).unwrap().public_key();
            assert_eq!(pk.to_hex(compressed), expected_sec);

            let decoded = PublicKey::decode(&hex::decode(expected_sec).unwrap()).unwrap();
            assert_eq!(decoded, pk);
        }
    }

    #[test]
    fn test_public_key_decode_rejects_bad_input() {
        assert!(matches!(
            PublicKey::decode(&[]),
            Err(KeyError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            PublicKey::decode(&[0x05; 33]),
            Err(KeyError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            PublicKey::decode(&[0x04; 33]),
            Err(KeyError::InvalidLength { expected: 65, .. })
        ));

        // G with y bumped by one is off the curve
        let mut sec = generator_sec();
        sec[64] ^= 0x01;
        assert!(matches!(
            PublicKey::decode(&sec),
            Err(KeyError::InvalidPublicKey(_))
        ));

        // x = 5 has no square root of x^3 + 7 on secp256k1
        let mut compressed = [0u8; 33];
        compressed[0] = 0x02;
        compressed[32] = 0x05;
        assert!(matches!(
            PublicKey::decode(&compressed),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }

    fn generator_sec() -> Vec<u8> {
        hex::decode(concat!(
            "04",
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        ))
        .unwrap()
    }

    #[test]
    fn test_generator_sec_roundtrip() {
        let sec = generator_sec();
        let pk = PublicKey::decode(&sec).unwrap();
        assert_eq!(pk.point(), SECP256K1.g);
        assert_eq!(pk.encode(false), sec);
        assert_eq!(PublicKey::decode(&pk.encode(true)).unwrap(), pk);
    }

    #[test]
    fn test_key_generation() {
        let pair = generate_key_pair().unwrap();
        let sk = pair.private_key().scalar();
        assert!(sk >= BigUint::one());
        assert!(sk < SECP256K1.n);
        assert!(SECP256K1.curve.contains(&pair.public_key().point()));
        assert_eq!(pair.public_key().to_hex(false).len(), 130);
        assert_eq!(pair.private_key().to_hex().len(), 64);
    }

    #[test]
    fn test_two_generations_differ() {
        let a = generate_key_pair().unwrap();
        let b = generate_key_pair().unwrap();
        assert_ne!(a.private_key(), b.private_key());
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_private_key_with(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_private_key_with(&mut StdRng::seed_from_u64(7)).unwrap();
        let c = generate_private_key_with(&mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_entropy_failure_is_reported() {
        let err = generate_key_pair_with(&mut FailingRng).unwrap_err();
        assert_eq!(
            err,
            KeyError::EntropyFailure("entropy source starved".to_string())
        );
    }

    #[test]
    fn test_stuck_source_is_rejected() {
        // All-zero and all-0xff candidates are both outside [1, n-1]
        for byte in [0x00, 0xff] {
            assert!(matches!(
                generate_private_key_with(&mut ConstantRng(byte)),
                Err(KeyError::EntropyFailure(_))
            ));
        }
        let sk = generate_private_key_with(&mut ConstantRng(0x42)).unwrap();
        assert_eq!(sk.to_hex(), "42".repeat(32));
    }
}
