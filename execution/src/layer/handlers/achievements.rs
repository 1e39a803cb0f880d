use super::super::*;

impl<'a, S: State> Layer<'a, S> {
    pub(in crate::layer) async fn handle_award_achievement(
        &mut self,
        public: &PublicKey,
    ) -> Result<Vec<Event>, LayerError> {
        let mut player = self.player(public).await?;
        player.achievement_count = player
            .achievement_count
            .checked_add(1)
            .ok_or(LedgerError::InvalidAmount)?;
        let count = player.achievement_count;
        self.put_player(public, player);

        Ok(vec![Event::AchievementAwarded {
            player: public.clone(),
            count,
        }])
    }
}
