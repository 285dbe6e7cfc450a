//! Signed calls.
//!
//! A call names one mutating election operation. It travels signed by the
//! caller's ed25519 key, and the caller's [`Address`] is derived from that
//! key rather than claimed.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::{Address, Error, ProposalId};

/// A mutating election operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    RegisterVoter { voter: Address },
    StartProposalsRegistration,
    SubmitProposal { description: String },
    EndProposalsRegistration,
    StartVotingSession,
    CastVote { proposal: ProposalId },
    EndVotingSession,
    TallyVotes,
}

/// A call together with the key that signed it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignedCall {
    /// Caller's ed25519 public key.
    pub public_key: [u8; 32],

    /// Per-caller sequence number, starting at 0.
    pub nonce: u64,

    pub call: Call,

    /// Ed25519 signature over the call content.
    pub signature: Vec<u8>,
}

impl SignedCall {
    /// Create a call and sign it.
    pub fn new(call: Call, nonce: u64, signing_key: &SigningKey) -> Result<Self, Error> {
        let mut signed = Self {
            public_key: signing_key.verifying_key().to_bytes(),
            nonce,
            call,
            signature: Vec::new(),
        };

        let content = signed.signable_content()?;
        signed.signature = signing_key.sign(&content).to_bytes().to_vec();

        Ok(signed)
    }

    /// The address of the key this call claims to be signed by.
    pub fn caller(&self) -> Result<Address, Error> {
        Ok(Address::from_public_key(&self.verifying_key()?))
    }

    /// Check the signature and return the authenticated caller.
    pub fn verify(&self) -> Result<Address, Error> {
        let key = self.verifying_key()?;
        let caller = Address::from_public_key(&key);

        let sig_bytes: [u8; 64] = self
            .signature
            .as_slice()
            .try_into()
            .map_err(|_| Error::InvalidSignature(caller))?;
        let signature = Signature::from_bytes(&sig_bytes);

        let content = self.signable_content()?;
        key.verify(&content, &signature)
            .map_err(|_| Error::InvalidSignature(caller))?;

        Ok(caller)
    }

    fn verifying_key(&self) -> Result<VerifyingKey, Error> {
        VerifyingKey::from_bytes(&self.public_key)
            .map_err(|e| Error::InvalidPublicKey(e.to_string()))
    }

    /// Get the content to be signed (excludes the signature).
    fn signable_content(&self) -> Result<Vec<u8>, Error> {
        let signable = SignableCall {
            public_key: &self.public_key,
            nonce: self.nonce,
            call: &self.call,
        };

        let mut buf = Vec::new();
        ciborium::into_writer(&signable, &mut buf)?;
        Ok(buf)
    }
}

#[derive(Serialize)]
struct SignableCall<'a> {
    public_key: &'a [u8; 32],
    nonce: u64,
    call: &'a Call,
}
