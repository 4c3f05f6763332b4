mod challenge_dto;

pub use challenge_dto::{
    ChallengeListItemDto, ChallengeListQuery, ChallengeResponseDto, CreateChallengeDto,
    UpdateChallengeDto,
};
